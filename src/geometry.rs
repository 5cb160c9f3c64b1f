/// Tolerance used by the `Collider::intersects` convenience method.
pub const DEFAULT_TOLERANCE: f32 = 0.1;

/// An axis-aligned box with its origin at the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y
    }

    pub fn top(&self) -> f32 {
        self.y + self.h
    }

    pub fn rx(&self) -> f32 {
        self.w / 2.0
    }

    pub fn ry(&self) -> f32 {
        self.h / 2.0
    }

    /// Degrees from this box's origin to the other's, normalized to [0, 360).
    fn angle_to(&self, other: &Aabb) -> f32 {
        (other.y - self.y)
            .atan2(other.x - self.x)
            .to_degrees()
            .rem_euclid(360.0)
    }
}

/// A collidable shape. Rotation never enters collision; both variants are
/// tested through their axis-aligned bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    Rect(Aabb),
    /// An ellipse inscribed in its bounds (a circle when the bounds are
    /// square).
    Ellipse(Aabb),
}

impl Collider {
    pub fn bounds(&self) -> &Aabb {
        match self {
            Collider::Rect(bounds) | Collider::Ellipse(bounds) => bounds,
        }
    }

    pub fn intersects(&self, other: &Collider) -> Option<bool> {
        intersect(Some(self), Some(other), DEFAULT_TOLERANCE)
    }
}

/// Do two shapes overlap? `None` means no answer is computable because an
/// operand is missing; callers must treat it as distinct from `Some(false)`.
///
/// `tolerance` is accepted for signature compatibility but does not enter
/// the math yet; every result is tolerance-independent.
///
/// Two rectangles intersect exactly when their bounds overlap. With one
/// ellipse in play, a rectangle edge crossing either ellipse axis guarantees
/// overlap; otherwise the rectangle corner facing the ellipse is tested
/// against the ellipse equation. Picking that corner by angle quadrant is an
/// approximation for non-circular ellipses, kept as-is. Two ellipses are not
/// supported yet and always report `Some(false)`; do not read that as proven
/// disjoint.
pub fn intersect(a: Option<&Collider>, b: Option<&Collider>, _tolerance: f32) -> Option<bool> {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        _ => return None,
    };

    let (ab, bb) = (a.bounds(), b.bounds());
    if ab.left() > bb.right()
        || ab.right() < bb.left()
        || ab.bottom() > bb.top()
        || ab.top() < bb.bottom()
    {
        return Some(false);
    }

    let (ellipse, rect) = match (a, b) {
        (Collider::Rect(_), Collider::Rect(_)) => return Some(true),
        (Collider::Ellipse(_), Collider::Ellipse(_)) => return Some(false),
        (Collider::Ellipse(ellipse), Collider::Rect(rect))
        | (Collider::Rect(rect), Collider::Ellipse(ellipse)) => (ellipse, rect),
    };

    let center_x = ellipse.x + ellipse.rx();
    let center_y = ellipse.y + ellipse.ry();

    // A rectangle edge strictly crossing either ellipse axis means the edge
    // passes through the ellipse's widest extent.
    if rect.left() < center_x && rect.right() > center_x
        || rect.bottom() < center_y && rect.top() > center_y
    {
        return Some(true);
    }

    // Quadrants are closed on the lower end: an angle of exactly 90 keeps
    // the right-top corner.
    let (px, py) = match rect.angle_to(ellipse) {
        angle if angle <= 90.0 => (rect.right(), rect.top()),
        angle if angle <= 180.0 => (rect.left(), rect.top()),
        angle if angle <= 270.0 => (rect.left(), rect.bottom()),
        _ => (rect.right(), rect.bottom()),
    };

    // Strict: a corner exactly on the boundary does not intersect. A
    // zero-radius ellipse divides to inf (or NaN at its center), so it never
    // intersects through this test.
    let dx = px - center_x;
    let dy = py - center_y;
    Some(dx * dx / (ellipse.rx() * ellipse.rx()) + dy * dy / (ellipse.ry() * ellipse.ry()) < 1.0)
}
