//! Scene selection: the interactive question sequence and a one-line DSL.
//!
//! Both front ends produce the same [`SceneSpec`].
//!
//! # Interactive order
//!
//! 1. width of the coordinate space (empty answer keeps the default)
//! 2. height (same)
//! 3. algorithm token: `BIA`, `DDA`, `BA`, `MPC` or `BCA`, any case
//! 4. `x1`, `y1`, `x2`, `y2` for lines, or `cx`, `cy`, `r` for circles
//!
//! # DSL syntax
//!
//! ```text
//! <algorithm> key=value...
//!
//! Line keys:    x1= y1= x2= y2=
//! Circle keys:  cx= cy= r=
//! Options:      width=800 height=600 color=red|#ff0000
//! ```
//!
//! # Example
//!
//! ```rust
//! use trueno_raster::prompt::parse_prompt;
//! use trueno_raster::scene::Algorithm;
//!
//! let spec = parse_prompt("bca cx=0 cy=0 r=5 width=640 height=480").unwrap();
//! assert_eq!(spec.request.algorithm, Algorithm::BresenhamCircle);
//! assert_eq!((spec.width, spec.height), (640, 480));
//! ```

use std::collections::HashMap;
use std::io::{BufRead, Write};

use log::debug;

use crate::color::{parse_color, Rgba};
use crate::config::WindowConfig;
use crate::error::{Error, Result};
use crate::geometry::{CircleInput, LineInput};
use crate::scene::{Algorithm, SceneRequest};

/// Everything needed to build and show one scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSpec {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Kernel selection and parameters.
    pub request: SceneRequest,
    /// Pixel color override.
    pub color: Option<Rgba>,
}

/// Interactive question sequence over any reader/writer pair.
#[derive(Debug)]
pub struct PromptSession<R, W> {
    reader: R,
    writer: W,
    defaults: WindowConfig,
}

impl<R: BufRead, W: Write> PromptSession<R, W> {
    /// Create a session with the default 800 x 600 surface.
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer, defaults: WindowConfig::default() }
    }

    /// Use `defaults` for empty width/height answers.
    #[must_use]
    pub fn with_defaults(mut self, defaults: WindowConfig) -> Self {
        self.defaults = defaults;
        self
    }

    /// Ask every question in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputParse`] on end of input or an unparseable
    /// answer, and [`Error::Domain`] for invalid geometry (negative or
    /// fractional radius, non-finite coordinates).
    pub fn run(&mut self) -> Result<SceneSpec> {
        let width = self.ask_dimension("Width of the coordinate space", self.defaults.width)?;
        let height = self.ask_dimension("Height of the coordinate space", self.defaults.height)?;

        let token = self.ask("Algorithm (BIA, DDA, BA, MPC, BCA)")?;
        let algorithm: Algorithm = token.parse()?;

        let request = if algorithm.is_circle() {
            let cx = self.ask_number("Circle centre x")?;
            let cy = self.ask_number("Circle centre y")?;
            let r = self.ask_number("Circle radius")?;
            SceneRequest::circle(algorithm, CircleInput::from_f64(cx, cy, r)?)
        } else {
            let x1 = self.ask_number("Start point x")?;
            let y1 = self.ask_number("Start point y")?;
            let x2 = self.ask_number("End point x")?;
            let y2 = self.ask_number("End point y")?;
            SceneRequest::line(algorithm, LineInput::new(x1, y1, x2, y2)?)
        };

        debug!("prompt answered: {width}x{height} {algorithm}");
        Ok(SceneSpec { width, height, request, color: None })
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        writeln!(self.writer, "{question}:")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(Error::parse(format!("no answer to '{question}': end of input")));
        }
        Ok(line.trim().to_string())
    }

    fn ask_dimension(&mut self, question: &str, default: u32) -> Result<u32> {
        let answer = self.ask(&format!("{question} [{default}]"))?;
        if answer.is_empty() {
            return Ok(default);
        }
        parse_dimension(question, &answer)
    }

    fn ask_number(&mut self, question: &str) -> Result<f64> {
        let answer = self.ask(question)?;
        parse_number(question, &answer)
    }
}

fn parse_number(what: &str, s: &str) -> Result<f64> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::parse(format!("{what}: '{s}' is not a number")))
}

fn parse_dimension(what: &str, s: &str) -> Result<u32> {
    match s.parse::<u32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(Error::parse(format!("{what}: '{s}' is not a positive integer"))),
    }
}

/// Parse a one-line scene description with the default surface size.
///
/// # Errors
///
/// See [`parse_prompt_with`].
pub fn parse_prompt(prompt: &str) -> Result<SceneSpec> {
    parse_prompt_with(prompt, WindowConfig::default())
}

/// Parse a one-line scene description, taking absent `width`/`height` from
/// `defaults`.
///
/// # Errors
///
/// Returns [`Error::InputParse`] for an unknown algorithm, a malformed or
/// missing parameter, or an unknown key; [`Error::Domain`] for invalid
/// geometry.
pub fn parse_prompt_with(prompt: &str, defaults: WindowConfig) -> Result<SceneSpec> {
    let mut parts = prompt.split_whitespace();
    let algorithm: Algorithm =
        parts.next().ok_or_else(|| Error::parse("empty scene description"))?.parse()?;

    let mut values: HashMap<String, &str> = HashMap::new();
    for token in parts {
        let (key, value) = token
            .split_once('=')
            .ok_or_else(|| Error::parse(format!("expected key=value, got '{token}'")))?;
        values.insert(key.to_lowercase(), value);
    }

    let known: &[&str] = if algorithm.is_circle() {
        &["cx", "cy", "r", "width", "height", "color"]
    } else {
        &["x1", "y1", "x2", "y2", "width", "height", "color"]
    };
    if let Some(unknown) = values.keys().find(|k| !known.contains(&k.as_str())) {
        return Err(Error::parse(format!("unknown parameter '{unknown}' for {algorithm}")));
    }

    let number = |key: &str| -> Result<f64> {
        let raw = values
            .get(key)
            .ok_or_else(|| Error::parse(format!("{algorithm} requires {key}=<number>")))?;
        parse_number(key, raw)
    };

    let request = if algorithm.is_circle() {
        SceneRequest::circle(algorithm, CircleInput::from_f64(number("cx")?, number("cy")?, number("r")?)?)
    } else {
        let line = LineInput::new(number("x1")?, number("y1")?, number("x2")?, number("y2")?)?;
        SceneRequest::line(algorithm, line)
    };

    let width = values.get("width").map_or(Ok(defaults.width), |v| parse_dimension("width", v))?;
    let height = values.get("height").map_or(Ok(defaults.height), |v| parse_dimension("height", v))?;
    let color = values.get("color").map(|v| parse_color(v)).transpose()?;

    Ok(SceneSpec { width, height, request, color })
}
