use cpm_infer::pose::{Person, LIMB_COLORS};

/// Line thickness used when drawing skeletons
pub const DEFAULT_THICKNESS: usize = 2;

/// Draw a line using Bresenham's algorithm with clipping
pub fn draw_line(
    buf: &mut [u8],
    width: usize,
    height: usize,
    from: (i32, i32),
    to: (i32, i32),
    color: [u8; 3],
) {
    let Some(((mut x0, mut y0), (x1, y1))) = clip_line(from, to, width as i32, height as i32) else {
        return;
    };

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    loop {
        set_pixel(buf, width, x0 as usize, y0 as usize, color);

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Draw a line `thickness` pixels wide by offsetting a 1px line across its minor axis
pub fn draw_thick_line(
    buf: &mut [u8],
    width: usize,
    height: usize,
    from: (i32, i32),
    to: (i32, i32),
    thickness: usize,
    color: [u8; 3],
) {
    let thickness = thickness.max(1) as i32;
    let lo = -(thickness - 1) / 2;
    let steep = (to.1 - from.1).abs() > (to.0 - from.0).abs();

    for offset in lo..lo + thickness {
        let (ox, oy) = if steep { (offset, 0) } else { (0, offset) };
        draw_line(
            buf,
            width,
            height,
            (from.0 + ox, from.1 + oy),
            (to.0 + ox, to.1 + oy),
            color,
        );
    }
}

/// Draw every person's limbs onto an HWC RGB buffer, one color per limb
pub fn draw_limbs(buf: &mut [u8], width: usize, height: usize, people: &[Person], thickness: usize) {
    for person in people {
        for (limb, a, b) in person.limb_segments() {
            draw_thick_line(
                buf,
                width,
                height,
                (a.col, a.row),
                (b.col, b.row),
                thickness,
                LIMB_COLORS[limb],
            );
        }
    }
}

fn set_pixel(buf: &mut [u8], width: usize, x: usize, y: usize, color: [u8; 3]) {
    let idx = (y * width + x) * 3;
    if let Some(px) = buf.get_mut(idx..idx + 3) {
        px.copy_from_slice(&color);
    }
}

// Cohen-Sutherland outcodes
const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

/// Clip a segment to `[0, width) x [0, height)`; `None` when nothing is visible
fn clip_line(
    (mut x0, mut y0): (i32, i32),
    (mut x1, mut y1): (i32, i32),
    width: i32,
    height: i32,
) -> Option<((i32, i32), (i32, i32))> {
    if width <= 0 || height <= 0 {
        return None;
    }
    // each pass moves one endpoint onto an edge; integer rounding can need a few extra
    for _ in 0..8 {
        let outcode0 = compute_outcode(x0, y0, width, height);
        let outcode1 = compute_outcode(x1, y1, width, height);

        if (outcode0 | outcode1) == 0 {
            return Some(((x0, y0), (x1, y1)));
        }
        if (outcode0 & outcode1) != 0 {
            return None;
        }

        let outcode = if outcode0 != 0 { outcode0 } else { outcode1 };
        let (x, y) = clip_point(x0, y0, x1, y1, outcode, width, height);
        if outcode == outcode0 {
            x0 = x;
            y0 = y;
        } else {
            x1 = x;
            y1 = y;
        }
    }
    None
}

fn compute_outcode(x: i32, y: i32, width: i32, height: i32) -> u8 {
    let mut code = INSIDE;
    if x < 0 {
        code |= LEFT;
    } else if x >= width {
        code |= RIGHT;
    }
    if y < 0 {
        code |= TOP;
    } else if y >= height {
        code |= BOTTOM;
    }
    code
}

fn clip_point(x0: i32, y0: i32, x1: i32, y1: i32, outcode: u8, width: i32, height: i32) -> (i32, i32) {
    // i64 keeps dx * dy from overflowing for far-off endpoints
    let (x0, y0, x1, y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
    let dx = x1 - x0;
    let dy = y1 - y0;
    let (width, height) = (width as i64, height as i64);

    let (x, y) = if outcode & TOP != 0 {
        (x0 + dx * (0 - y0) / dy, 0)
    } else if outcode & BOTTOM != 0 {
        (x0 + dx * (height - 1 - y0) / dy, height - 1)
    } else if outcode & LEFT != 0 {
        (0, y0 + dy * (0 - x0) / dx)
    } else {
        (width - 1, y0 + dy * (width - 1 - x0) / dx)
    };
    (x as i32, y as i32)
}
