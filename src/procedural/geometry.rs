use crate::color::Color;
use crate::procedural::utils;
use crate::scene::{BillboardKind, NodeKind};
use glamx::Vec3;
use std::path::PathBuf;

/// How a sequence of line vertices is connected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineTopology {
    /// Consecutive vertices are connected.
    Strip,
    /// Each pair of vertices is one segment.
    List,
    /// A strip whose last vertex connects back to the first one.
    Loop,
}

/// How a sequence of triangle vertices is connected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriangleTopology {
    /// Each vertex forms a triangle with the two before it.
    Strip,
    /// Each triple of vertices is one triangle.
    List,
}

/// Description of the geometry of a leaf.
///
/// Per-primitive colors (one per segment, triangle or point) are only supported
/// by list topologies. The `line_*` and `triangle_*` constructors convert strips
/// and loops carrying colors into lists.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Geometry {
    /// A square grid on the `z = 0` plane.
    Grid {
        /// Side length of the grid, rounded up to an even number of cells.
        full_length: f32,
        /// Side length of one cell.
        cell_length: f32,
    },
    /// A coordinate frame with red, green and blue X, Y, Z axes of unit length.
    Axes,
    /// A unit arrow along the X axis.
    Arrow {
        /// Number of facets of the shaft and tip.
        resolution: u32,
    },
    /// A box centered at the origin.
    Cuboid {
        /// Full dimensions along each axis.
        extents: Vec3,
    },
    /// A sphere centered at the origin.
    Sphere {
        radius: f32,
        theta_resolution: u32,
        phi_resolution: u32,
    },
    /// A cylinder centered at the origin, along the Y axis.
    Cylinder {
        radius: f32,
        height: f32,
        resolution: u32,
    },
    /// An ellipsoid centered at the origin.
    Ellipsoid {
        /// Radii along each axis.
        radii: Vec3,
    },
    /// A cone centered at the origin.
    Cone {
        radius: f32,
        height: f32,
        resolution: u32,
    },
    /// A torus on the `z = 0` plane.
    Torus {
        ring_radius: f32,
        cross_section_radius: f32,
    },
    /// Line segments.
    Lines {
        vertices: Vec<Vec3>,
        topology: LineTopology,
        /// One color per segment.
        colors: Option<Vec<Color>>,
    },
    /// Triangles.
    Triangles {
        vertices: Vec<Vec3>,
        topology: TriangleTopology,
        /// One color per triangle.
        colors: Option<Vec<Color>>,
    },
    /// A planar quad given by its four corners.
    Quad { corners: [Vec3; 4] },
    /// A quad with an image mapped onto it.
    TexturedQuad { corners: [Vec3; 4], image: PathBuf },
    /// A set of points.
    PointCloud {
        points: Vec<Vec3>,
        /// One color per point.
        colors: Option<Vec<Color>>,
    },
    /// A mesh read from a model file, with an optional texture.
    Model {
        path: PathBuf,
        texture: Option<PathBuf>,
    },
    /// A fixed-size text label.
    TextBillboard { text: String, size: Option<u32> },
    /// A fixed-size image sprite.
    ImageBillboard {
        image: PathBuf,
        width: Option<f32>,
        height: Option<f32>,
    },
}

impl Geometry {
    /// A square grid of `full_length` side and `cell_length` cells.
    ///
    /// The side holds an even number of cells, at most [`utils::MAX_GRID_CELLS`].
    /// Non-finite or non-positive lengths give an empty grid.
    pub fn grid(full_length: f32, cell_length: f32) -> Self {
        let ncells = utils::grid_cell_count(full_length, cell_length);
        let full_length = ncells as f32 * cell_length;

        Geometry::Grid {
            full_length,
            cell_length,
        }
    }

    /// A coordinate frame.
    pub fn axes() -> Self {
        Geometry::Axes
    }

    /// An arrow with `resolution` facets.
    pub fn arrow(resolution: u32) -> Self {
        Geometry::Arrow { resolution }
    }

    /// A box with the given full dimensions.
    pub fn cuboid(x_length: f32, y_length: f32, z_length: f32) -> Self {
        Geometry::Cuboid {
            extents: Vec3::new(x_length, y_length, z_length),
        }
    }

    /// A sphere.
    pub fn sphere(radius: f32, theta_resolution: u32, phi_resolution: u32) -> Self {
        Geometry::Sphere {
            radius,
            theta_resolution,
            phi_resolution,
        }
    }

    /// A cylinder.
    pub fn cylinder(radius: f32, height: f32, resolution: u32) -> Self {
        Geometry::Cylinder {
            radius,
            height,
            resolution,
        }
    }

    /// An ellipsoid.
    pub fn ellipsoid(x_radius: f32, y_radius: f32, z_radius: f32) -> Self {
        Geometry::Ellipsoid {
            radii: Vec3::new(x_radius, y_radius, z_radius),
        }
    }

    /// A cone.
    pub fn cone(radius: f32, height: f32, resolution: u32) -> Self {
        Geometry::Cone {
            radius,
            height,
            resolution,
        }
    }

    /// A torus.
    pub fn torus(ring_radius: f32, cross_section_radius: f32) -> Self {
        Geometry::Torus {
            ring_radius,
            cross_section_radius,
        }
    }

    /// A line strip. With colors, it is converted into a line list.
    pub fn line_strip(vertices: Vec<Vec3>, colors: Option<Vec<Color>>) -> Self {
        match colors {
            Some(colors) => Geometry::Lines {
                vertices: utils::line_strip_to_line_list(&vertices),
                topology: LineTopology::List,
                colors: Some(colors),
            },
            None => Geometry::Lines {
                vertices,
                topology: LineTopology::Strip,
                colors: None,
            },
        }
    }

    /// A line list.
    pub fn line_list(vertices: Vec<Vec3>, colors: Option<Vec<Color>>) -> Self {
        Geometry::Lines {
            vertices,
            topology: LineTopology::List,
            colors,
        }
    }

    /// A closed line loop. With colors, it is converted into a line list.
    pub fn line_loop(vertices: Vec<Vec3>, colors: Option<Vec<Color>>) -> Self {
        match colors {
            Some(colors) => Geometry::Lines {
                vertices: utils::line_loop_to_line_list(&vertices),
                topology: LineTopology::List,
                colors: Some(colors),
            },
            None => Geometry::Lines {
                vertices,
                topology: LineTopology::Loop,
                colors: None,
            },
        }
    }

    /// A triangle strip. With colors, it is converted into a triangle list.
    pub fn triangle_strip(vertices: Vec<Vec3>, colors: Option<Vec<Color>>) -> Self {
        match colors {
            Some(colors) => Geometry::Triangles {
                vertices: utils::triangle_strip_to_triangle_list(&vertices),
                topology: TriangleTopology::List,
                colors: Some(colors),
            },
            None => Geometry::Triangles {
                vertices,
                topology: TriangleTopology::Strip,
                colors: None,
            },
        }
    }

    /// A triangle list.
    pub fn triangle_list(vertices: Vec<Vec3>, colors: Option<Vec<Color>>) -> Self {
        Geometry::Triangles {
            vertices,
            topology: TriangleTopology::List,
            colors,
        }
    }

    /// A quad.
    pub fn quad(corners: [Vec3; 4]) -> Self {
        Geometry::Quad { corners }
    }

    /// A textured quad.
    pub fn textured_quad(corners: [Vec3; 4], image: impl Into<PathBuf>) -> Self {
        Geometry::TexturedQuad {
            corners,
            image: image.into(),
        }
    }

    /// A point cloud.
    pub fn point_cloud(points: Vec<Vec3>, colors: Option<Vec<Color>>) -> Self {
        Geometry::PointCloud { points, colors }
    }

    /// A mesh loaded from a model file.
    pub fn model(path: impl Into<PathBuf>, texture: Option<PathBuf>) -> Self {
        Geometry::Model {
            path: path.into(),
            texture,
        }
    }

    /// A text label.
    pub fn text_billboard(text: impl Into<String>, size: Option<u32>) -> Self {
        Geometry::TextBillboard {
            text: text.into(),
            size,
        }
    }

    /// An image sprite.
    pub fn image_billboard(
        image: impl Into<PathBuf>,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Self {
        Geometry::ImageBillboard {
            image: image.into(),
            width,
            height,
        }
    }

    /// The kind of leaf created from this geometry.
    pub fn kind(&self) -> NodeKind {
        match self {
            Geometry::Axes => NodeKind::Axes,
            Geometry::TextBillboard { .. } => NodeKind::Billboard(BillboardKind::Text),
            Geometry::ImageBillboard { .. } => NodeKind::Billboard(BillboardKind::Image),
            _ => NodeKind::Actor,
        }
    }

    /// A short name of the geometry type.
    pub fn label(&self) -> &'static str {
        match self {
            Geometry::Grid { .. } => "grid",
            Geometry::Axes => "axes",
            Geometry::Arrow { .. } => "arrow",
            Geometry::Cuboid { .. } => "box",
            Geometry::Sphere { .. } => "sphere",
            Geometry::Cylinder { .. } => "cylinder",
            Geometry::Ellipsoid { .. } => "ellipsoid",
            Geometry::Cone { .. } => "cone",
            Geometry::Torus { .. } => "torus",
            Geometry::Lines {
                topology: LineTopology::Strip,
                ..
            } => "linestrip",
            Geometry::Lines {
                topology: LineTopology::List,
                ..
            } => "linelist",
            Geometry::Lines {
                topology: LineTopology::Loop,
                ..
            } => "lineloop",
            Geometry::Triangles {
                topology: TriangleTopology::Strip,
                ..
            } => "trianglestrip",
            Geometry::Triangles {
                topology: TriangleTopology::List,
                ..
            } => "trianglelist",
            Geometry::Quad { .. } => "quad",
            Geometry::TexturedQuad { .. } => "texturedquad",
            Geometry::PointCloud { .. } => "pointcloud",
            Geometry::Model { .. } => "model",
            Geometry::TextBillboard { .. } => "textbillboard",
            Geometry::ImageBillboard { .. } => "imagebillboard",
        }
    }
}
