//! SVG path data parsing
//!
//! Turns a path `d` attribute into absolute [`PathCommand`]s so the scene can
//! derive a path shape's intrinsic geometry. Supports M, L, H, V, C, S, Q, T,
//! A and Z in both absolute and relative form.

use super::types::{BBox, DVec2};

/// Samples taken along each curve segment when measuring bounds
const CURVE_SAMPLES: usize = 16;

/// Absolute path command
#[derive(Clone, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(DVec2),
    LineTo(DVec2),
    QuadraticTo { control: DVec2, to: DVec2 },
    CubicTo { ctrl1: DVec2, ctrl2: DVec2, to: DVec2 },
    ArcTo {
        rx: f64,
        ry: f64,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: DVec2,
    },
    Close,
}

/// Parse an SVG path string. Malformed trailing data is dropped.
pub fn parse_svg_path(d: &str) -> Vec<PathCommand> {
    let mut commands = Vec::new();
    let mut tokens = PathTokenizer::new(d);

    let mut current = DVec2::ZERO;
    let mut subpath_start = DVec2::ZERO;
    let mut last_control: Option<DVec2> = None;
    let mut last_command: Option<char> = None;

    while let Some(cmd) = tokens.next_command() {
        let relative = cmd.is_ascii_lowercase();
        let resolve = |origin: DVec2, x: f64, y: f64| {
            if relative {
                origin + DVec2::new(x, y)
            } else {
                DVec2::new(x, y)
            }
        };

        match cmd.to_ascii_uppercase() {
            'M' => {
                let mut first = true;
                while let Some((x, y)) = tokens.next_point() {
                    let point = resolve(current, x, y);
                    if first {
                        commands.push(PathCommand::MoveTo(point));
                        subpath_start = point;
                        first = false;
                    } else {
                        // Extra pairs after a moveto are implicit linetos
                        commands.push(PathCommand::LineTo(point));
                    }
                    current = point;
                }
                last_control = None;
            }
            'L' => {
                while let Some((x, y)) = tokens.next_point() {
                    current = resolve(current, x, y);
                    commands.push(PathCommand::LineTo(current));
                }
                last_control = None;
            }
            'H' => {
                while let Some(x) = tokens.next_coordinate() {
                    current.x = if relative { current.x + x } else { x };
                    commands.push(PathCommand::LineTo(current));
                }
                last_control = None;
            }
            'V' => {
                while let Some(y) = tokens.next_coordinate() {
                    current.y = if relative { current.y + y } else { y };
                    commands.push(PathCommand::LineTo(current));
                }
                last_control = None;
            }
            'C' => {
                while let Some((x1, y1)) = tokens.next_point() {
                    let Some((x2, y2)) = tokens.next_point() else { break };
                    let Some((x, y)) = tokens.next_point() else { break };

                    let ctrl1 = resolve(current, x1, y1);
                    let ctrl2 = resolve(current, x2, y2);
                    let to = resolve(current, x, y);
                    commands.push(PathCommand::CubicTo { ctrl1, ctrl2, to });
                    last_control = Some(ctrl2);
                    current = to;
                }
            }
            'S' => {
                while let Some((x2, y2)) = tokens.next_point() {
                    let Some((x, y)) = tokens.next_point() else { break };

                    let ctrl1 = match (last_command, last_control) {
                        (Some('C' | 'S'), Some(lc)) => current * 2.0 - lc,
                        _ => current,
                    };
                    let ctrl2 = resolve(current, x2, y2);
                    let to = resolve(current, x, y);
                    commands.push(PathCommand::CubicTo { ctrl1, ctrl2, to });
                    last_control = Some(ctrl2);
                    last_command = Some('S');
                    current = to;
                }
            }
            'Q' => {
                while let Some((x1, y1)) = tokens.next_point() {
                    let Some((x, y)) = tokens.next_point() else { break };

                    let control = resolve(current, x1, y1);
                    let to = resolve(current, x, y);
                    commands.push(PathCommand::QuadraticTo { control, to });
                    last_control = Some(control);
                    current = to;
                }
            }
            'T' => {
                while let Some((x, y)) = tokens.next_point() {
                    let control = match (last_command, last_control) {
                        (Some('Q' | 'T'), Some(lc)) => current * 2.0 - lc,
                        _ => current,
                    };
                    let to = resolve(current, x, y);
                    commands.push(PathCommand::QuadraticTo { control, to });
                    last_control = Some(control);
                    last_command = Some('T');
                    current = to;
                }
            }
            'A' => {
                while let Some(arc) = tokens.next_arc() {
                    let to = resolve(current, arc.x, arc.y);
                    commands.push(PathCommand::ArcTo {
                        rx: arc.rx,
                        ry: arc.ry,
                        x_rotation: arc.x_rotation,
                        large_arc: arc.large_arc,
                        sweep: arc.sweep,
                        to,
                    });
                    current = to;
                }
                last_control = None;
            }
            'Z' => {
                commands.push(PathCommand::Close);
                current = subpath_start;
                last_control = None;
            }
            _ => {}
        }

        last_command = Some(cmd.to_ascii_uppercase());
    }

    commands
}

/// Bounds of the drawn outline. Curves are sampled; arcs count by their
/// endpoints only.
pub fn path_bounds(commands: &[PathCommand]) -> Option<BBox> {
    let mut points = Vec::new();
    let mut current = DVec2::ZERO;
    let mut subpath_start = DVec2::ZERO;

    for command in commands {
        match command {
            PathCommand::MoveTo(p) => {
                current = *p;
                subpath_start = *p;
                points.push(*p);
            }
            PathCommand::LineTo(p) => {
                current = *p;
                points.push(*p);
            }
            PathCommand::QuadraticTo { control, to } => {
                for i in 1..=CURVE_SAMPLES {
                    let t = i as f64 / CURVE_SAMPLES as f64;
                    let mt = 1.0 - t;
                    points.push(current * (mt * mt) + *control * (2.0 * mt * t) + *to * (t * t));
                }
                current = *to;
            }
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                for i in 1..=CURVE_SAMPLES {
                    let t = i as f64 / CURVE_SAMPLES as f64;
                    let mt = 1.0 - t;
                    points.push(
                        current * (mt * mt * mt)
                            + *ctrl1 * (3.0 * mt * mt * t)
                            + *ctrl2 * (3.0 * mt * t * t)
                            + *to * (t * t * t),
                    );
                }
                current = *to;
            }
            PathCommand::ArcTo { to, .. } => {
                current = *to;
                points.push(*to);
            }
            PathCommand::Close => {
                current = subpath_start;
            }
        }
    }

    BBox::from_points(&points)
}

struct ArcParams {
    rx: f64,
    ry: f64,
    x_rotation: f64,
    large_arc: bool,
    sweep: bool,
    x: f64,
    y: f64,
}

struct PathTokenizer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> PathTokenizer<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            chars: s.chars().peekable(),
        }
    }

    fn skip_separators(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() || c == ',' {
                self.chars.next();
            } else {
                break;
            }
        }
    }

    fn next_command(&mut self) -> Option<char> {
        self.skip_separators();
        match self.chars.peek() {
            Some(&c) if c.is_ascii_alphabetic() => {
                self.chars.next();
                Some(c)
            }
            Some(_) => {
                // Stray number with no command; skip it and keep going
                self.next_number()?;
                self.next_command()
            }
            None => None,
        }
    }

    fn at_command(&mut self) -> bool {
        self.skip_separators();
        matches!(self.chars.peek(), Some(c) if c.is_ascii_alphabetic())
    }

    fn push_digits(&mut self, s: &mut String) {
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() {
                s.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
    }

    fn next_number(&mut self) -> Option<f64> {
        self.skip_separators();
        let mut s = String::new();

        if let Some(&c) = self.chars.peek() {
            if c == '-' || c == '+' {
                s.push(c);
                self.chars.next();
            }
        }

        self.push_digits(&mut s);

        if self.chars.peek() == Some(&'.') {
            s.push('.');
            self.chars.next();
            self.push_digits(&mut s);
        }

        if let Some(&c) = self.chars.peek() {
            if c == 'e' || c == 'E' {
                s.push(c);
                self.chars.next();
                if let Some(&sign) = self.chars.peek() {
                    if sign == '-' || sign == '+' {
                        s.push(sign);
                        self.chars.next();
                    }
                }
                self.push_digits(&mut s);
            }
        }

        s.parse().ok()
    }

    fn next_coordinate(&mut self) -> Option<f64> {
        if self.at_command() {
            return None;
        }
        self.next_number()
    }

    fn next_point(&mut self) -> Option<(f64, f64)> {
        if self.at_command() {
            return None;
        }
        let x = self.next_number()?;
        let y = self.next_number()?;
        Some((x, y))
    }

    fn next_flag(&mut self) -> Option<bool> {
        self.skip_separators();
        match self.chars.peek() {
            Some('0') => {
                self.chars.next();
                Some(false)
            }
            Some('1') => {
                self.chars.next();
                Some(true)
            }
            _ => None,
        }
    }

    fn next_arc(&mut self) -> Option<ArcParams> {
        if self.at_command() {
            return None;
        }
        Some(ArcParams {
            rx: self.next_number()?,
            ry: self.next_number()?,
            x_rotation: self.next_number()?,
            large_arc: self.next_flag()?,
            sweep: self.next_flag()?,
            x: self.next_number()?,
            y: self.next_number()?,
        })
    }
}
