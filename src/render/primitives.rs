//! Pixel-level drawing onto a [`Framebuffer`].
//!
//! Lines are walked with the crate's own [`BresenhamLine`], so what the host
//! shows on screen is exactly what the rasterizer computes.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::raster::BresenhamLine;

/// Draw a one-pixel line between two pixel positions, endpoints included.
///
/// The segment is clipped to the surface first, so the walk is bounded by
/// the surface size whatever the endpoints are.
pub fn draw_line(fb: &mut Framebuffer, from: (i64, i64), to: (i64, i64), color: Rgba) {
    let Some((from, to)) = clip_segment(from, to, fb.width(), fb.height()) else {
        return;
    };
    for (x, y) in BresenhamLine::new(from.0, from.1, to.0, to.1) {
        fb.set_pixel(x, y, color);
    }
}

/// Liang-Barsky clip of a pixel segment to `[0, width) x [0, height)`.
///
/// Segments already inside are returned unchanged.
fn clip_segment(
    from: (i64, i64),
    to: (i64, i64),
    width: u32,
    height: u32,
) -> Option<((i64, i64), (i64, i64))> {
    let (max_x, max_y) = (i64::from(width) - 1, i64::from(height) - 1);
    let inside = |(x, y): (i64, i64)| (0..=max_x).contains(&x) && (0..=max_y).contains(&y);
    if inside(from) && inside(to) {
        return Some((from, to));
    }

    let (x0, y0) = (from.0 as f64, from.1 as f64);
    let (dx, dy) = (to.0 as f64 - x0, to.1 as f64 - y0);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    let (mut snap0, mut snap1) = (None, None);
    let edges = [
        (-dx, x0, Edge::X(0)),
        (dx, max_x as f64 - x0, Edge::X(max_x)),
        (-dy, y0, Edge::Y(0)),
        (dy, max_y as f64 - y0, Edge::Y(max_y)),
    ];
    for (p, q, edge) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t0 {
                t0 = t;
                snap0 = Some(edge);
            }
        } else if t < t1 {
            t1 = t;
            snap1 = Some(edge);
        }
        if t0 > t1 {
            return None;
        }
    }

    // The crossed edge is exact; only the other coordinate is interpolated.
    let at = |t: f64, snap: Option<Edge>| {
        let x = ((x0 + t * dx).round() as i64).clamp(0, max_x);
        let y = ((y0 + t * dy).round() as i64).clamp(0, max_y);
        match snap {
            Some(Edge::X(v)) => (v, y),
            Some(Edge::Y(v)) => (x, v),
            None => (x, y),
        }
    };
    Some((at(t0, snap0), at(t1, snap1)))
}

#[derive(Clone, Copy)]
enum Edge {
    X(i64),
    Y(i64),
}

/// Draw a filled `size` x `size` square centred on a pixel position.
///
/// Even sizes lean towards the top-left.
pub fn draw_point(fb: &mut Framebuffer, at: (i64, i64), size: u32, color: Rgba) {
    let size = size.max(1);
    let half = i64::from(size / 2);
    fb.fill_rect(at.0 - half, at.1 - half, size, size, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Framebuffer {
        let mut fb = Framebuffer::new(20, 20).unwrap();
        fb.clear(Rgba::BLACK);
        fb
    }

    #[test]
    fn test_draw_line_horizontal() {
        let mut fb = canvas();
        draw_line(&mut fb, (2, 5), (9, 5), Rgba::WHITE);
        assert_eq!(fb.count_color(Rgba::WHITE), 8);
        assert_eq!(fb.get_pixel(2, 5), Some(Rgba::WHITE));
        assert_eq!(fb.get_pixel(9, 5), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_line_steep_reverse() {
        let mut fb = canvas();
        draw_line(&mut fb, (3, 15), (1, 2), Rgba::WHITE);
        assert_eq!(fb.count_color(Rgba::WHITE), 14);
        assert_eq!(fb.get_pixel(3, 15), Some(Rgba::WHITE));
        assert_eq!(fb.get_pixel(1, 2), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_line_clips() {
        let mut fb = canvas();
        draw_line(&mut fb, (-10, 0), (30, 0), Rgba::RED);
        assert_eq!(fb.count_color(Rgba::RED), 20);
    }

    #[test]
    fn test_draw_line_far_endpoints_are_clipped() {
        let mut fb = canvas();
        draw_line(&mut fb, (i64::MIN / 2, 5), (i64::MAX / 2, 5), Rgba::RED);
        assert_eq!(fb.count_color(Rgba::RED), 20);

        let mut fb = canvas();
        let far = 1_000_000_000_000;
        draw_line(&mut fb, (-far, -far), (far, far), Rgba::RED);
        assert_eq!(fb.count_color(Rgba::RED), 20);
        assert_eq!(fb.get_pixel(0, 0), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(19, 19), Some(Rgba::RED));
    }

    #[test]
    fn test_draw_line_outside_draws_nothing() {
        let mut fb = canvas();
        draw_line(&mut fb, (-50, -3), (400, -1), Rgba::RED);
        draw_line(&mut fb, (25, 0), (25, 19), Rgba::RED);
        assert_eq!(fb.count_color(Rgba::RED), 0);
    }

    #[test]
    fn test_draw_line_single_pixel() {
        let mut fb = canvas();
        draw_line(&mut fb, (4, 4), (4, 4), Rgba::RED);
        assert_eq!(fb.count_color(Rgba::RED), 1);
    }

    #[test]
    fn test_draw_point_sizes() {
        let mut fb = canvas();
        draw_point(&mut fb, (10, 10), 3, Rgba::GREEN);
        assert_eq!(fb.count_color(Rgba::GREEN), 9);
        assert_eq!(fb.get_pixel(9, 9), Some(Rgba::GREEN));
        assert_eq!(fb.get_pixel(11, 11), Some(Rgba::GREEN));

        let mut fb = canvas();
        draw_point(&mut fb, (10, 10), 0, Rgba::GREEN);
        assert_eq!(fb.count_color(Rgba::GREEN), 1);
    }
}
