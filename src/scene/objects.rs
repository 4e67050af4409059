//! The furniture of the desk scene as step tables.
//!
//! Each [`SceneObject`] is a flat script of uniform writes and draws. Steps
//! only write what they name, so a part without a `Texture` or `UvScale` step
//! reuses whatever the previous part left in the shader (the mug and the books
//! rely on this).

use crate::data_structures::{instance::Transform, mesh::MeshKind};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    Transform(Transform),
    Texture(&'static str),
    Color([f32; 4]),
    UvScale(f32, f32),
    Material(&'static str),
    Draw(MeshKind),
}

#[derive(Clone, Copy, Debug)]
pub struct SceneObject {
    pub name: &'static str,
    pub steps: &'static [Step],
}

impl SceneObject {
    pub fn draw_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step, Step::Draw(_)))
            .count()
    }
}

/// Texture files of the scene and the tags they are registered under.
pub const SCENE_TEXTURES: [(&str, &str); 4] = [
    ("brick.jpg", "brick"),
    ("desk.jpg", "desk"),
    ("wood.jpg", "wood"),
    ("plastic.jpg", "plastic"),
];

const fn at(scale: [f32; 3], rotation: [f32; 3], position: [f32; 3]) -> Step {
    Step::Transform(Transform::new(scale, rotation, position))
}

const fn offset(position: [f32; 3], by: [f32; 3]) -> [f32; 3] {
    [position[0] + by[0], position[1] + by[1], position[2] + by[2]]
}

const NO_ROTATION: [f32; 3] = [0.0; 3];

const DESK: &[Step] = &[
    at([30.0, 1.0, 10.0], NO_ROTATION, [0.0, 0.0, 0.0]),
    Step::Texture("desk"),
    Step::UvScale(2.0, 2.0),
    Step::Material("wood"),
    Step::Draw(MeshKind::Plane),
];

const BACK_WALL: &[Step] = &[
    at([30.0, 1.0, 10.0], [90.0, 0.0, 0.0], [0.0, 10.0, -10.0]),
    Step::Texture("brick"),
    Step::UvScale(7.0, 3.0),
    Step::Material("brick"),
    Step::Draw(MeshKind::Plane),
];

const DESK_STAND: &[Step] = &[
    // shelf
    at([14.0, 1.0, 4.0], NO_ROTATION, [0.0, 2.0, -6.0]),
    Step::Texture("desk"),
    Step::UvScale(1.0, 1.0),
    Step::Material("wood"),
    Step::Draw(MeshKind::Box),
    // right leg
    at([1.0, 2.0, 4.0], NO_ROTATION, [6.5, 1.0, -6.0]),
    Step::Texture("desk"),
    Step::UvScale(1.0, 1.0),
    Step::Material("wood"),
    Step::Draw(MeshKind::Box),
    // left leg
    at([1.0, 2.0, 4.0], NO_ROTATION, [-6.5, 1.0, -6.0]),
    Step::Texture("desk"),
    Step::UvScale(1.0, 1.0),
    Step::Material("wood"),
    Step::Draw(MeshKind::Box),
];

const MUG: &[Step] = &[
    // handle, top bar
    at([0.125, 0.75, 0.125], [0.0, 0.0, 90.0], [1.5, 4.1, -5.0]),
    Step::Texture("plastic"),
    Step::Material("glass"),
    Step::Draw(MeshKind::Cylinder),
    // handle, bottom bar
    at([0.125, 0.75, 0.125], [0.0, 0.0, 90.0], [1.25, 3.1, -5.0]),
    Step::Draw(MeshKind::Cylinder),
    // handle, outer bar
    at([0.125, 1.3, 0.125], [0.0, 0.0, 165.86], [1.5, 4.2, -5.0]),
    Step::Draw(MeshKind::Cylinder),
    // body, upside down so the wide end is the rim
    at([1.0, 2.0, 1.0], [0.0, 0.0, 180.0], [0.0, 4.5, -5.0]),
    Step::Draw(MeshKind::TaperedCylinder),
];

const BOOKS: &[Step] = &[
    // bottom book
    at([3.0, 1.0, 4.0], [0.0, 20.0, 0.0], [-2.5, 0.5, 0.0]),
    Step::Material("paper"),
    Step::Draw(MeshKind::Box),
    at([1.5, 0.5, 2.0], [0.0, 20.0, 0.0], [-2.5, 1.001, 0.0]),
    Step::Material("bottom_cover"),
    Step::Draw(MeshKind::Plane),
    at([0.5, 1.0, 2.0], [0.0, 20.0, 90.0], [-3.93, 0.5, 0.495]),
    Step::Material("bottom_cover"),
    Step::Draw(MeshKind::Plane),
    // top book
    at([2.6, 1.0, 3.467], [0.0, -20.0, 0.0], [-2.5, 1.5, 0.0]),
    Step::Material("paper"),
    Step::Draw(MeshKind::Box),
    at([1.35, 0.5, 1.75], [0.0, -20.0, 0.0], [-2.5, 2.001, 0.0]),
    Step::Material("top_cover"),
    Step::Draw(MeshKind::Plane),
    at([0.5, 1.0, 1.75], [0.0, -20.0, 90.0], [-3.73, 1.5, -0.535]),
    Step::Material("top_cover"),
    Step::Draw(MeshKind::Plane),
    at([1.35, 0.5, 1.75], [0.0, -20.0, 0.0], [-2.5, 0.999, 0.0]),
    Step::Material("top_cover"),
    Step::Draw(MeshKind::Plane),
];

const LAMP_OFFSET: [f32; 3] = [4.0, 0.0, -1.0];

const LAMP: &[Step] = &[
    // base
    at([1.5, 0.35, 1.5], NO_ROTATION, offset([-0.65, 0.0, 0.0], LAMP_OFFSET)),
    Step::Texture("plastic"),
    Step::Material("plastic"),
    Step::Draw(MeshKind::Cylinder),
    // upper arm
    at([0.25, 3.75, 0.25], [0.0, 0.0, 60.0], offset([1.0, 3.3, 0.0], LAMP_OFFSET)),
    Step::Material("plastic"),
    Step::Draw(MeshKind::Box),
    // lower arm
    at([0.25, 4.0, 0.25], [0.0, 0.0, -60.0], offset([1.0, 1.3, 0.0], LAMP_OFFSET)),
    Step::Material("plastic"),
    Step::Draw(MeshKind::Box),
    // shade
    at([1.25, 2.0, 1.25], [-15.0, 0.0, -30.0], offset([-1.0, 3.0, 0.25], LAMP_OFFSET)),
    Step::Material("plastic"),
    Step::Draw(MeshKind::Cone),
];

const PEN_HOLDER_OFFSET: [f32; 3] = [-3.0, 3.5, -6.0];

const PEN_HOLDER: &[Step] = &[
    // front wall
    at([1.5, 2.0, 0.25], NO_ROTATION, offset([0.0, 0.0, 0.6], PEN_HOLDER_OFFSET)),
    Step::Texture("wood"),
    Step::UvScale(0.25, 0.25),
    Step::Material("wood"),
    Step::Draw(MeshKind::Box),
    // right wall
    at([0.25, 2.0, 1.4], NO_ROTATION, offset([0.6, 0.0, 0.0], PEN_HOLDER_OFFSET)),
    Step::Texture("wood"),
    Step::UvScale(0.25, 0.25),
    Step::Material("wood"),
    Step::Draw(MeshKind::Box),
    // left wall
    at([0.25, 2.0, 1.4], NO_ROTATION, offset([-0.6, 0.0, 0.0], PEN_HOLDER_OFFSET)),
    Step::Texture("wood"),
    Step::UvScale(0.25, 0.25),
    Step::Material("wood"),
    Step::Draw(MeshKind::Box),
    // back wall
    at([1.5, 2.0, 0.25], NO_ROTATION, offset([0.0, 0.0, -0.6], PEN_HOLDER_OFFSET)),
    Step::Texture("wood"),
    Step::UvScale(0.25, 0.25),
    Step::Material("wood"),
    Step::Draw(MeshKind::Box),
    // pencils
    at([0.125, 3.0, 0.125], [0.0, 0.0, 15.0], offset([0.1, -0.5, 0.0], PEN_HOLDER_OFFSET)),
    Step::Texture("plastic"),
    Step::Material("wood"),
    Step::Draw(MeshKind::Cylinder),
    at([0.125, 3.0, 0.125], [20.0, 0.0, -10.0], offset([0.1, -0.5, -0.5], PEN_HOLDER_OFFSET)),
    Step::Material("wood"),
    Step::Draw(MeshKind::Cylinder),
    // erasers
    at([0.12, 0.2, 0.12], [0.0, 0.0, 15.0], offset([-0.66, 2.35, 0.0], PEN_HOLDER_OFFSET)),
    Step::Material("rubber"),
    Step::Draw(MeshKind::Cylinder),
    at([0.12, 0.2, 0.12], [20.0, 0.0, -10.0], offset([0.61, 2.21, 0.49], PEN_HOLDER_OFFSET)),
    Step::Material("rubber"),
    Step::Draw(MeshKind::Cylinder),
];

/// Every object of the scene, in drawing order.
pub const SCENE: [SceneObject; 7] = [
    SceneObject { name: "desk", steps: DESK },
    SceneObject { name: "back wall", steps: BACK_WALL },
    SceneObject { name: "desk stand", steps: DESK_STAND },
    SceneObject { name: "mug", steps: MUG },
    SceneObject { name: "books", steps: BOOKS },
    SceneObject { name: "lamp", steps: LAMP },
    SceneObject { name: "pen holder", steps: PEN_HOLDER },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_object_ends_with_a_draw() {
        for object in SCENE {
            assert!(
                matches!(object.steps.last(), Some(Step::Draw(_))),
                "{} has trailing state writes",
                object.name
            );
        }
    }

    #[test]
    fn draw_counts_per_object() {
        let counts: Vec<_> = SCENE.iter().map(SceneObject::draw_count).collect();
        assert_eq!(counts, [1, 1, 3, 4, 7, 4, 8]);
    }

    fn assert_position(step: Step, expected: [f32; 3]) {
        let Step::Transform(transform) = step else {
            panic!("expected a transform step, got {step:?}");
        };
        for (got, want) in transform.position.iter().zip(expected) {
            assert!((got - want).abs() < 1e-5, "{:?} != {expected:?}", transform.position);
        }
    }

    #[test]
    fn offsets_are_added_to_every_part() {
        assert_position(LAMP[0], [3.35, 0.0, -1.0]);
        assert_position(PEN_HOLDER[PEN_HOLDER.len() - 3], [-2.39, 5.71, -5.51]);
    }

    #[test]
    fn tables_only_reference_scene_textures() {
        let tags: Vec<_> = SCENE_TEXTURES.iter().map(|(_, tag)| *tag).collect();
        for object in SCENE {
            for step in object.steps {
                if let Step::Texture(tag) = step {
                    assert!(tags.contains(tag), "{} uses unknown texture {tag}", object.name);
                }
            }
        }
    }
}
