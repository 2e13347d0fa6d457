//! The fixed scene hierarchy
//!
//! Four groups of models plus a sun, each group hanging off a root that spins
//! about its vertical axis. [`compose`] walks the groups with a
//! [`TransformStack`] and records, for every model drawn, its transform and
//! the material state in effect at that moment.

use cgmath::Matrix4;

use super::transform_stack::TransformStack;
use crate::gfx::resources::{
    global_bindings::DirectionalLight,
    material::{Diffuse, MaterialState},
};

/// Meshes the scene is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Model {
    Female,
    Bottle,
    TreeAspen,
    Bunny,
    TeapotChinese,
    Male,
    Axe,
    TreeConical,
    Bird,
    Sun,
}

impl Model {
    pub const ALL: [Model; 10] = [
        Model::Female,
        Model::Bottle,
        Model::TreeAspen,
        Model::Bunny,
        Model::TeapotChinese,
        Model::Male,
        Model::Axe,
        Model::TreeConical,
        Model::Bird,
        Model::Sun,
    ];

    /// OBJ file backing this model, `None` for generated geometry
    pub fn file_name(self) -> Option<&'static str> {
        match self {
            Model::Female => Some("female.obj"),
            Model::Bottle => Some("bottle.obj"),
            Model::TreeAspen => Some("tree_aspen.obj"),
            Model::Bunny => Some("bunny.obj"),
            Model::TeapotChinese => Some("teapot_chinese.obj"),
            Model::Male => Some("male.obj"),
            Model::Axe => Some("axe.obj"),
            Model::TreeConical => Some("tree_conical.obj"),
            Model::Bird => Some("bird.obj"),
            Model::Sun => None,
        }
    }
}

/// Sun sphere tessellation: slices, stacks, radius
pub const SUN_SPHERE: (u32, u32, f32) = (20, 22, 0.2);

/// Lights whose directions are carried by the sun's transform
pub const SUN_LIGHTS: [DirectionalLight; 2] = [
    DirectionalLight {
        direction: [-0.1, -0.3, 0.6],
        diffuse: [1.0, 1.0, 1.0],
    },
    DirectionalLight {
        direction: [-0.5, 0.6, 0.0],
        diffuse: [0.6, 0.05, 0.05],
    },
];

/// Light fixed relative to the eye
pub const EYE_LIGHT: DirectionalLight = DirectionalLight {
    direction: [0.1, 0.1, 0.0],
    diffuse: [0.05, 0.05, 0.6],
};

/// One drawn model
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub name: &'static str,
    pub model: Model,
    /// Model-to-world transform
    pub transform: Matrix4<f32>,
    pub material: MaterialState,
}

struct Composer<'a> {
    stack: TransformStack,
    materials: &'a mut MaterialState,
    placements: Vec<Placement>,
}

impl Composer<'_> {
    /// Runs `build` between a push and a pop
    fn group(&mut self, build: impl FnOnce(&mut Self)) {
        self.stack.push();
        build(self);
        self.stack.pop();
    }

    fn draw(&mut self, name: &'static str, model: Model) {
        self.placements.push(Placement {
            name,
            model,
            transform: self.stack.current(),
            material: *self.materials,
        });
    }

    fn front(&mut self, diffuse: Diffuse) {
        self.materials.set_front(diffuse);
    }

    fn back(&mut self, diffuse: Diffuse) {
        self.materials.set_back(diffuse);
    }
}

/// Lays out the whole scene for the given spin angles (degrees)
///
/// `materials` is read and updated the way draw calls update GL material
/// state, so keep passing the same value from frame to frame.
pub fn compose(angles: &[f32; 5], materials: &mut MaterialState) -> Vec<Placement> {
    let mut c = Composer {
        stack: TransformStack::new(),
        materials,
        placements: Vec::with_capacity(15),
    };

    // A figure holding a bottle, next to an aspen
    c.group(|c| {
        c.front(Diffuse::VIOLET);
        c.stack.translate(-0.5, -0.5, -0.1);
        c.stack.uniform_scale(0.6);
        c.stack.rotate_deg(angles[0], 0.0, 1.0, 0.0);
        c.draw("figure", Model::Female);

        c.group(|c| {
            c.front(Diffuse::CYAN);
            c.stack.translate(0.3, 0.65, -0.25);
            c.stack.uniform_scale(0.35);
            c.draw("bottle", Model::Bottle);
        });

        c.group(|c| {
            c.front(Diffuse::SPRING_GREEN);
            c.back(Diffuse::LIGHT_GREEN);
            c.stack.translate(-0.6, 0.4, 0.8);
            c.stack.scale(2.7, 2.6, 2.0);
            c.draw("aspen", Model::TreeAspen);
        });
    });

    // A bunny surrounded by a couple, an axe and a teapot
    c.group(|c| {
        c.stack.translate(0.45, 0.2, -0.3);
        c.stack.uniform_scale(0.3);
        c.stack.rotate_deg(90.0, 0.0, 1.0, 0.0);
        c.stack.rotate_deg(angles[1], 0.0, 1.0, 0.0);
        c.front(Diffuse::BROWN);
        c.draw("bunny", Model::Bunny);

        c.group(|c| {
            c.stack.translate(1.5, 1.0, 1.25);
            c.stack.uniform_scale(2.0);
            c.front(Diffuse::PURPLE);
            c.draw("woman", Model::Female);
        });

        c.group(|c| {
            c.stack.translate(1.5, 1.1, -1.25);
            c.stack.uniform_scale(2.0);
            c.stack.rotate_deg(180.0, 0.0, 1.0, 0.0);
            c.front(Diffuse::SLATE_BLUE);
            c.draw("man", Model::Male);
        });

        c.group(|c| {
            c.stack.translate(1.25, 1.1, 1.55);
            c.stack.uniform_scale(0.75);
            c.stack.rotate_deg(90.0, 0.0, 1.0, 0.1);
            c.front(Diffuse::GRAY);
            c.draw("axe", Model::Axe);
        });

        c.group(|c| {
            c.stack.translate(1.5, 0.9, -1.53);
            c.stack.uniform_scale(0.75);
            c.stack.rotate_deg(45.0, -0.1, 0.0, 0.0);
            c.front(Diffuse::SALMON);
            c.draw("teapot", Model::TeapotChinese);
        });
    });

    // Three conical trees
    c.group(|c| {
        c.stack.translate(-1.0, 0.7, -0.8);
        c.stack.uniform_scale(0.6);
        c.stack.rotate_deg(angles[2], 0.0, 1.0, 0.0);
        c.front(Diffuse::OLIVE_GREEN);
        c.back(Diffuse::OLIVE);
        c.draw("conifer", Model::TreeConical);

        c.group(|c| {
            c.stack.translate(-0.8, 0.3, -0.6);
            c.stack.scale(1.2, 1.2, 0.8);
            c.front(Diffuse::FOREST_GREEN);
            c.draw("conifer left", Model::TreeConical);
        });

        c.group(|c| {
            c.stack.translate(0.2, 0.3, -0.6);
            c.stack.scale(1.2, 1.2, 0.8);
            c.front(Diffuse::DARK_GREEN);
            c.draw("conifer right", Model::TreeConical);
        });
    });

    // A flock of three birds
    c.group(|c| {
        c.stack.translate(0.3, 1.0, 0.0);
        c.stack.uniform_scale(0.2);
        c.stack.rotate_deg(angles[3], 0.0, 1.0, 0.0);
        c.front(Diffuse::YELLOW);
        c.draw("bird", Model::Bird);

        c.group(|c| {
            c.stack.translate(-1.5, 0.0, 0.3);
            c.front(Diffuse::ORANGE);
            c.draw("bird left", Model::Bird);
        });

        c.group(|c| {
            c.stack.translate(1.5, 0.0, -0.3);
            c.front(Diffuse::INDIGO);
            c.draw("bird right", Model::Bird);
        });
    });

    // The sun, which also carries two of the lights
    c.group(|c| {
        c.stack.translate(-0.25, 1.4, -0.3);
        c.stack.uniform_scale(0.45);
        c.stack.rotate_deg(angles[4], 0.0, 1.0, 0.0);
        c.front(Diffuse::SUN);
        c.draw("sun", Model::Sun);
    });

    c.placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Point3, Transform};

    fn origin_of(placement: &Placement) -> Point3<f32> {
        placement.transform.transform_point(Point3::new(0.0, 0.0, 0.0))
    }

    fn assert_point(actual: Point3<f32>, expected: [f32; 3]) {
        assert!(
            (actual.x - expected[0]).abs() < 1e-5
                && (actual.y - expected[1]).abs() < 1e-5
                && (actual.z - expected[2]).abs() < 1e-5,
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    fn find<'a>(placements: &'a [Placement], name: &str) -> &'a Placement {
        placements.iter().find(|p| p.name == name).unwrap()
    }

    #[test]
    fn test_scene_has_fifteen_models() {
        let placements = compose(&[0.0; 5], &mut MaterialState::default());
        assert_eq!(placements.len(), 15);

        let count = |model: Model| placements.iter().filter(|p| p.model == model).count();
        assert_eq!(count(Model::Female), 2);
        assert_eq!(count(Model::TreeConical), 3);
        assert_eq!(count(Model::Bird), 3);
        assert_eq!(count(Model::Sun), 1);
    }

    #[test]
    fn test_every_model_is_used() {
        let placements = compose(&[0.0; 5], &mut MaterialState::default());
        for model in Model::ALL {
            assert!(placements.iter().any(|p| p.model == model), "{:?}", model);
        }
    }

    #[test]
    fn test_child_inherits_parent_transform() {
        let placements = compose(&[0.0; 5], &mut MaterialState::default());
        assert_point(origin_of(find(&placements, "bottle")), [-0.32, -0.11, -0.25]);

        let parent = find(&placements, "figure").transform;
        let child = find(&placements, "bottle").transform;
        let local = Matrix4::from_translation(cgmath::Vector3::new(0.3, 0.65, -0.25))
            * Matrix4::from_scale(0.35);
        let expected = parent * local;
        for col in 0..4 {
            for row in 0..4 {
                assert!((child[col][row] - expected[col][row]).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_root_spin_moves_children() {
        let placements = compose(&[90.0, 0.0, 0.0, 0.0, 0.0], &mut MaterialState::default());
        assert_point(origin_of(find(&placements, "bottle")), [-0.65, -0.11, -0.28]);
        // The root itself spins in place
        assert_point(origin_of(find(&placements, "figure")), [-0.5, -0.5, -0.1]);
    }

    #[test]
    fn test_sibling_groups_do_not_leak() {
        let placements = compose(&[0.0; 5], &mut MaterialState::default());
        assert_point(origin_of(find(&placements, "bunny")), [0.45, 0.2, -0.3]);
        assert_point(origin_of(find(&placements, "conifer")), [-1.0, 0.7, -0.8]);
        assert_point(origin_of(find(&placements, "bird")), [0.3, 1.0, 0.0]);
        assert_point(origin_of(find(&placements, "sun")), [-0.25, 1.4, -0.3]);
    }

    #[test]
    fn test_back_material_carries_over() {
        let mut materials = MaterialState::default();
        let placements = compose(&[0.0; 5], &mut materials);

        assert_eq!(find(&placements, "figure").material.back, Diffuse::DEFAULT);
        assert_eq!(find(&placements, "aspen").material.back, Diffuse::LIGHT_GREEN);
        // Second group never sets a back colour
        assert_eq!(find(&placements, "bunny").material.back, Diffuse::LIGHT_GREEN);
        assert_eq!(find(&placements, "conifer left").material.back, Diffuse::OLIVE);
        assert_eq!(find(&placements, "bird right").material.back, Diffuse::OLIVE);
        assert_eq!(find(&placements, "bird right").material.front, Diffuse::INDIGO);

        // Next frame starts with the state the previous one left behind
        let next = compose(&[0.0; 5], &mut materials);
        assert_eq!(find(&next, "figure").material.back, Diffuse::OLIVE);
        assert_eq!(materials.front, Diffuse::SUN);
    }

    #[test]
    fn test_only_sun_is_generated() {
        for model in Model::ALL {
            assert_eq!(model.file_name().is_none(), model == Model::Sun);
        }
    }
}
