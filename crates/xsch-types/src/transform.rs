use crate::Point;

/// Places a pin offset relative to an instance anchor, applying a horizontal
/// flip followed by a quarter-turn rotation, in that order. `rot` is taken
/// modulo 4; `flip` is 1 for a horizontal flip about the anchor, 0 otherwise.
pub fn place_pin(anchor: Point, offset: (f64, f64), rot: u8, flip: u8) -> Point {
    let x = anchor.x + offset.0;
    let y = anchor.y + offset.1;

    let xf = if flip == 1 { 2.0 * anchor.x - x } else { x };

    match rot % 4 {
        0 => Point::new(xf, y),
        1 => Point::new(anchor.x - y + anchor.y, anchor.y + xf - anchor.x),
        2 => Point::new(2.0 * anchor.x - xf, 2.0 * anchor.y - y),
        3 => Point::new(anchor.x + y - anchor.y, anchor.y - xf + anchor.x),
        _ => unreachable!("rot % 4 is always in 0..4"),
    }
}
