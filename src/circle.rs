use std::collections::HashMap;

use log::debug;

use crate::geometry::{Aabb, Collider};
use crate::host::{BlendMode, ImageRef, Layer, RenderHost, SpriteDraw};
use crate::mask;

/// A value carried by the open-ended attribute bag.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Number(f32),
    Text(String),
}

impl From<f32> for AttrValue {
    fn from(value: f32) -> Self {
        AttrValue::Number(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value as f32)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

/// An ordered batch of attribute assignments. Order is meaningful: pairs are
/// applied one by one, so a `path` listed after `w` and `h` configures the
/// render target at the final size.
#[derive(Debug, Clone, Default)]
pub struct Attrs(Vec<(String, AttrValue)>);

impl Attrs {
    pub fn new() -> Attrs {
        Attrs(Vec::new())
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Attrs {
        self.0.push((key.into(), value.into()));
        self
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for Attrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Attrs {
        Attrs(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Attrs {
    type Item = (String, AttrValue);
    type IntoIter = std::vec::IntoIter<(String, AttrValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A rectangle-shaped sprite clipped to the ellipse inscribed in its bounds.
///
/// The displayed "image" is a private render target holding the shared
/// circular mask with the requested image multiplied on top. `angle` is in
/// degrees and only affects drawing.
pub struct Circle {
    id: u64,
    target: String,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub angle: f32,
    path: Option<String>,
    extra: HashMap<String, AttrValue>,
}

impl Circle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn rx(&self) -> f32 {
        self.w / 2.0
    }

    pub fn ry(&self) -> f32 {
        self.h / 2.0
    }

    pub fn set_rx(&mut self, rx: f32) {
        self.w = rx * 2.0;
    }

    pub fn set_ry(&mut self, ry: f32) {
        self.h = ry * 2.0;
    }

    /// The last display path assigned, not the private target name.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Point the sprite at a new image. The private target is rebuilt at the
    /// current size as two layers: the shared mask, then the image clipped to
    /// it by the multiply blend.
    pub fn set_path(&mut self, host: &mut dyn RenderHost, path: impl Into<String>) {
        let path = path.into();
        host.configure_target(
            &self.target,
            self.w,
            self.h,
            vec![
                Layer {
                    x: 0.0,
                    y: 0.0,
                    w: self.w,
                    h: self.h,
                    image: ImageRef::Target(mask::MASK_TARGET.to_string()),
                    angle: 0.0,
                    blend: BlendMode::Alpha,
                },
                Layer {
                    x: 0.0,
                    y: 0.0,
                    w: self.w,
                    h: self.h,
                    image: ImageRef::Path(path.clone()),
                    angle: 0.0,
                    blend: BlendMode::Multiply,
                },
            ],
        );
        debug!("circle{} now masks {path}", self.id);
        self.path = Some(path);
    }

    /// Apply a batch of assignments. Radius and path keys go through their
    /// setters, the plain geometry keys through the typed fields; everything
    /// else, including a known key carrying the wrong value type, lands in
    /// the attribute bag unvalidated.
    pub fn merge(&mut self, host: &mut dyn RenderHost, attrs: Attrs) {
        for (key, value) in attrs {
            if !self.apply_known(host, &key, &value) {
                self.extra.insert(key, value);
            }
        }
    }

    fn apply_known(&mut self, host: &mut dyn RenderHost, key: &str, value: &AttrValue) -> bool {
        match (key, value) {
            ("x", AttrValue::Number(n)) => self.x = *n,
            ("y", AttrValue::Number(n)) => self.y = *n,
            ("w", AttrValue::Number(n)) => self.w = *n,
            ("h", AttrValue::Number(n)) => self.h = *n,
            ("angle", AttrValue::Number(n)) => self.angle = *n,
            ("rx", AttrValue::Number(n)) => self.set_rx(*n),
            ("ry", AttrValue::Number(n)) => self.set_ry(*n),
            ("path", AttrValue::Text(path)) => self.set_path(host, path.clone()),
            _ => return false,
        }
        true
    }

    /// Read a caller-supplied extra field. Known fields have typed accessors
    /// and never land here.
    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.extra.get(key)
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.extra.insert(key.into(), value.into());
    }

    pub fn sprite(&self) -> SpriteDraw {
        SpriteDraw {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
            image: ImageRef::Target(self.target.clone()),
            angle: self.angle,
        }
    }

    pub fn collider(&self) -> Collider {
        Collider::Ellipse(Aabb {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        })
    }
}

/// Hands out circles with unique ids and builds the shared mask exactly once.
/// Single-threaded by design; keep one factory per process.
#[derive(Default)]
pub struct CircleFactory {
    next_id: u64,
    mask_built: bool,
}

impl CircleFactory {
    pub fn new() -> CircleFactory {
        CircleFactory::default()
    }

    /// Circles constructed so far.
    pub fn created(&self) -> u64 {
        self.next_id
    }

    pub fn create(&mut self, host: &mut dyn RenderHost, attrs: Attrs) -> Circle {
        if !self.mask_built {
            self.mask_built = true;
            mask::build(host);
        }

        self.next_id += 1;
        let mut circle = Circle {
            id: self.next_id,
            target: format!("circle{}", self.next_id),
            x: 0.0,
            y: 0.0,
            w: 0.0,
            h: 0.0,
            angle: 0.0,
            path: None,
            extra: HashMap::new(),
        };
        circle.merge(host, attrs);
        circle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;
    use crate::mask::{MASK_SIZE, MASK_TARGET};

    #[test]
    fn radius_accessors_round_trip() {
        let mut host = RecordingHost::default();
        let mut factory = CircleFactory::new();
        let mut circle = factory.create(&mut host, Attrs::new());

        circle.set_rx(150.0);
        assert_eq!(circle.rx(), 150.0);
        assert_eq!(circle.w, 300.0);

        circle.set_ry(2.5);
        assert_eq!(circle.ry(), 2.5);
        assert_eq!(circle.h, 5.0);
    }

    #[test]
    fn construction_recipe() {
        let mut host = RecordingHost::default();
        let mut factory = CircleFactory::new();
        let circle = factory.create(
            &mut host,
            Attrs::new()
                .set("x", 0.0)
                .set("y", 0.0)
                .set("w", 300.0)
                .set("h", 300.0)
                .set("path", "sprites/square/red.png"),
        );

        assert_eq!(circle.rx(), 150.0);
        assert_eq!(circle.ry(), 150.0);
        assert_eq!(circle.path(), Some("sprites/square/red.png"));

        let target = &host.targets["circle1"];
        assert_eq!((target.w, target.h), (300.0, 300.0));
        assert_eq!(target.layers.len(), 2);
        assert_eq!(
            target.layers[0].image,
            ImageRef::Target(MASK_TARGET.to_string())
        );
        assert_eq!(target.layers[0].blend, BlendMode::Alpha);
        assert_eq!(
            target.layers[1].image,
            ImageRef::Path("sprites/square/red.png".to_string())
        );
        assert_eq!(target.layers[1].blend, BlendMode::Multiply);
        assert_eq!((target.layers[1].w, target.layers[1].h), (300.0, 300.0));

        // The drawable image is the private target, not the display path.
        assert_eq!(
            circle.sprite().image,
            ImageRef::Target("circle1".to_string())
        );
    }

    #[test]
    fn mask_built_once_across_constructions() {
        let mut host = RecordingHost::default();
        let mut factory = CircleFactory::new();
        factory.create(&mut host, Attrs::new().set("path", "a.png"));
        factory.create(&mut host, Attrs::new().set("path", "b.png"));

        let builds = host
            .configures
            .iter()
            .filter(|name| name.as_str() == MASK_TARGET)
            .count();
        assert_eq!(builds, 1);
        assert_eq!(host.targets[MASK_TARGET].w, MASK_SIZE);
    }

    #[test]
    fn ids_strictly_increase() {
        let mut host = RecordingHost::default();
        let mut factory = CircleFactory::new();
        let a = factory.create(&mut host, Attrs::new());
        let b = factory.create(&mut host, Attrs::new());
        let c = factory.create(&mut host, Attrs::new());

        assert!(a.id() < b.id());
        assert!(b.id() < c.id());
        assert_eq!(factory.created(), 3);

        // Private targets are distinct too.
        assert_ne!(a.sprite().image, b.sprite().image);
        assert_ne!(b.sprite().image, c.sprite().image);
    }

    #[test]
    fn merge_routes_known_keys_and_banks_the_rest() {
        let mut host = RecordingHost::default();
        let mut factory = CircleFactory::new();
        let mut circle = factory.create(&mut host, Attrs::new());

        circle.merge(
            &mut host,
            Attrs::new()
                .set("hp", 5.0)
                .set("label", "boss")
                .set("rx", 10.0),
        );
        assert_eq!(circle.attr("hp"), Some(&AttrValue::Number(5.0)));
        assert_eq!(circle.attr("label"), Some(&AttrValue::Text("boss".into())));
        assert_eq!(circle.w, 20.0);
        assert_eq!(circle.attr("rx"), None);

        circle.set_attr("hp", 4.0);
        assert_eq!(circle.attr("hp"), Some(&AttrValue::Number(4.0)));
    }

    #[test]
    fn wrong_typed_known_key_lands_in_bag() {
        let mut host = RecordingHost::default();
        let mut factory = CircleFactory::new();
        let mut circle = factory.create(&mut host, Attrs::new());

        circle.merge(&mut host, Attrs::new().set("x", "oops"));
        assert_eq!(circle.x, 0.0);
        assert_eq!(circle.attr("x"), Some(&AttrValue::Text("oops".into())));
    }

    #[test]
    fn attribute_order_is_applied_in_sequence() {
        let mut host = RecordingHost::default();
        let mut factory = CircleFactory::new();

        // Path first: the target is configured before the size lands.
        let attrs: Attrs = vec![
            ("path", AttrValue::from("red.png")),
            ("w", AttrValue::from(300.0)),
            ("h", AttrValue::from(300.0)),
        ]
        .into_iter()
        .collect();
        let circle = factory.create(&mut host, attrs);

        let ImageRef::Target(name) = circle.sprite().image else {
            panic!("circle sprite should reference its target");
        };
        assert_eq!(host.targets[&name].w, 0.0);
        assert_eq!(circle.w, 300.0);
    }

    #[test]
    fn repath_reconfigures_at_current_size() {
        let mut host = RecordingHost::default();
        let mut factory = CircleFactory::new();
        let mut circle = factory.create(&mut host, Attrs::new().set("path", "red.png"));

        circle.set_rx(50.0);
        circle.set_ry(50.0);
        circle.set_path(&mut host, "blue.png");

        assert_eq!(circle.path(), Some("blue.png"));
        let ImageRef::Target(name) = circle.sprite().image else {
            panic!("circle sprite should reference its target");
        };
        let target = &host.targets[&name];
        assert_eq!((target.w, target.h), (100.0, 100.0));
        assert_eq!(
            target.layers[1].image,
            ImageRef::Path("blue.png".to_string())
        );
    }

    #[test]
    fn collider_is_the_inscribed_ellipse() {
        let mut host = RecordingHost::default();
        let mut factory = CircleFactory::new();
        let circle = factory.create(
            &mut host,
            Attrs::new().set("x", 10.0).set("y", 20.0).set("rx", 15.0),
        );

        match circle.collider() {
            Collider::Ellipse(bounds) => {
                assert_eq!((bounds.x, bounds.y), (10.0, 20.0));
                assert_eq!(bounds.rx(), 15.0);
            }
            Collider::Rect(_) => panic!("a circle collides as an ellipse"),
        }
    }
}
