mod alert_modal;
mod toolbar;

pub use alert_modal::AlertModal;
pub use toolbar::Toolbar;
