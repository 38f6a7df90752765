mod contour;
mod line;
mod ray;
mod segment;

pub use contour::Contour;
pub use line::Line2;
pub use ray::Ray2;
pub use segment::Segment2;
