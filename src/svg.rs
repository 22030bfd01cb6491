//! Debug drawing of point sets as an SVG document.
//!
//! Points are drawn in a stack of coordinate frames: [`Svg::push`] enters the
//! frame of a [`Sim2D`] relative to the current one, [`Svg::pop`] leaves it.
//! The viewport is only known once everything is drawn, so the header is
//! written as a fixed size placeholder and rewritten in place by [`Svg::close`].

use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use nalgebra::Vector2;

use crate::error::Error;
use crate::sim2d::{Point, Sim2D};

const PROLOG: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n";

/// Bytes reserved for the `<svg>` opening tag, padding included.
const HEADER_CAPACITY: usize = 256;

/// SVG writer for point sets and transforms.
pub struct Svg<W: Write + Seek> {
    out: W,
    frames: Vec<Sim2D>,
    scale: Vector2<f64>,
    view: Option<(Point, Point)>,
}

impl Svg<BufWriter<File>> {
    /// Create (or truncate) the file at `path` and start a drawing.
    /// Coordinates are multiplied by `scale` per axis, use a negative y
    /// scale to get the y axis pointing up.
    pub fn create<P: AsRef<Path>>(path: P, scale: Vector2<f64>) -> Result<Self, Error> {
        Self::new(BufWriter::new(File::create(path)?), scale)
    }
}

impl<W: Write + Seek> Svg<W> {
    /// Start a drawing on `out`.
    pub fn new(mut out: W, scale: Vector2<f64>) -> Result<Self, Error> {
        out.write_all(PROLOG.as_bytes())?;
        out.write_all(&padded_header("")?)?;
        Ok(Self {
            out,
            frames: Vec::new(),
            scale,
            view: None,
        })
    }

    /// Enter the frame of `sim` expressed in the current frame.
    pub fn push(&mut self, sim: &Sim2D) {
        let frame = self.current() * *sim;
        self.frames.push(frame);
    }

    /// Return to the parent frame. Does nothing in the root frame.
    pub fn pop(&mut self) {
        self.frames.pop();
    }

    /// Draw one disk of `radius` (in the current frame) per point.
    pub fn draw(&mut self, points: &[Point], radius: f64, color: &str) -> Result<(), Error> {
        let frame = self.current();
        let rx = (radius * frame.s * self.scale.x).abs();
        let ry = (radius * frame.s * self.scale.y).abs();
        for p in points {
            let q = frame.transform_point(p);
            let c = Point::new(q.x * self.scale.x, q.y * self.scale.y);
            writeln!(
                self.out,
                "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" fill=\"{}\"/>",
                c.x, c.y, rx, ry, color
            )?;
            self.extend_view(Point::new(c.x - rx, c.y - ry), Point::new(c.x + rx, c.y + ry));
        }
        Ok(())
    }

    /// Terminate the document, write the final header and return the writer.
    pub fn close(mut self) -> Result<W, Error> {
        self.out.write_all(b"</svg>\n")?;
        let (min, max) = self
            .view
            .unwrap_or((Point::new(0.0, 0.0), Point::new(1.0, 1.0)));
        let size = max - min;
        let attributes = format!(
            "width=\"{}\" height=\"{}\" viewBox=\"{} {} {} {}\"",
            size.x, size.y, min.x, min.y, size.x, size.y
        );
        self.out.seek(SeekFrom::Start(PROLOG.len() as u64))?;
        self.out.write_all(&padded_header(&attributes)?)?;
        self.out.seek(SeekFrom::End(0))?;
        self.out.flush()?;
        Ok(self.out)
    }

    fn current(&self) -> Sim2D {
        self.frames.last().copied().unwrap_or_default()
    }

    fn extend_view(&mut self, lo: Point, hi: Point) {
        self.view = Some(match self.view {
            None => (lo, hi),
            Some((min, max)) => (min.inf(&lo), max.sup(&hi)),
        });
    }
}

/// `<svg>` opening tag with `attributes`, padded with spaces to
/// `HEADER_CAPACITY` bytes.
fn padded_header(attributes: &str) -> Result<Vec<u8>, Error> {
    let mut header = format!("<svg xmlns=\"http://www.w3.org/2000/svg\" {}", attributes);
    if header.len() + 2 > HEADER_CAPACITY {
        return Err(Error::HeaderOverflow {
            len: header.len() + 2,
            capacity: HEADER_CAPACITY,
        });
    }
    let padding = HEADER_CAPACITY - 2 - header.len();
    header.extend(std::iter::repeat(' ').take(padding));
    header.push_str(">\n");
    Ok(header.into_bytes())
}

// Tests #######################################################################
