//! Driver file parser.
//!
//! A driver file is a line-oriented scene description. Each non-blank line
//! that does not start with `#` is a directive keyword followed by
//! whitespace-separated values:
//!
//! - `eye ex ey ez`
//! - `look lx ly lz`
//! - `up ux uy uz`
//! - `d near`
//! - `bounds left bottom right top`
//! - `res width height`
//! - `recursionlevel n` (optional, default 0)
//! - `ambient r g b` (optional)
//! - `light x y z w r g b` (any number)
//! - `sphere x y z radius Ka Kd Ks [Kr]` (each reflectance is three values)
//! - `model wx wy wz theta scale tx ty tz file.obj` (any number)

use std::fs;
use std::path::Path;

use prism_math::{Placement, Point3, Vector3};
use thiserror::Error;

use crate::placement::ModelPlacement;
use crate::scene::{
    CameraSpec, Color, ImageBounds, Light, Material, SceneDescription, SphereSpec, DEFAULT_PHONG,
};

/// Errors that can occur during driver file parsing.
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid number '{value}' at line {line}")]
    InvalidNumber { line: usize, value: String },

    #[error("Missing required directive '{0}'")]
    MissingDirective(&'static str),

    #[error("Unknown directive '{keyword}' at line {line}")]
    UnknownDirective { line: usize, keyword: String },
}

/// Result type for driver parsing.
pub type DriverResult<T> = Result<T, DriverError>;

/// Values collected while walking the file. Required ones stay `None` until
/// seen.
#[derive(Default)]
struct Directives {
    eye: Option<Point3>,
    look: Option<Point3>,
    up: Option<Vector3>,
    near: Option<f64>,
    bounds: Option<ImageBounds>,
    res: Option<(u32, u32)>,
    recursion_depth: u32,
    ambient: Option<Light>,
    lights: Vec<Light>,
    spheres: Vec<SphereSpec>,
    models: Vec<ModelPlacement>,
}

/// Driver file parser.
pub struct DriverParser<'a> {
    content: &'a str,
    directives: Directives,
}

impl<'a> DriverParser<'a> {
    /// Create a new parser from file contents.
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            directives: Directives::default(),
        }
    }

    /// Parse every directive and assemble the scene description.
    pub fn parse(mut self) -> DriverResult<SceneDescription> {
        for (index, raw) in self.content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            self.parse_line(index + 1, line)?;
        }
        self.finish()
    }

    fn parse_line(&mut self, line_num: usize, line: &str) -> DriverResult<()> {
        let mut parts = line.split_whitespace();
        let keyword = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        log::debug!("line {}: {} {:?}", line_num, keyword, args);

        let d = &mut self.directives;
        match keyword {
            "eye" => {
                let v = parse_numbers(line_num, keyword, &args, 3)?;
                d.eye = Some(Point3::new(v[0], v[1], v[2]));
            }
            "look" => {
                let v = parse_numbers(line_num, keyword, &args, 3)?;
                d.look = Some(Point3::new(v[0], v[1], v[2]));
            }
            "up" => {
                let v = parse_numbers(line_num, keyword, &args, 3)?;
                d.up = Some(Vector3::new(v[0], v[1], v[2]));
            }
            "d" => {
                let v = parse_numbers(line_num, keyword, &args, 1)?;
                d.near = Some(v[0]);
            }
            "bounds" => {
                // left, bottom, right, top
                let v = parse_numbers(line_num, keyword, &args, 4)?;
                d.bounds = Some(ImageBounds::new(v[0], v[2], v[1], v[3]));
            }
            "res" => {
                expect_count(line_num, keyword, &args, 2)?;
                d.res = Some((
                    parse_value(line_num, args[0])?,
                    parse_value(line_num, args[1])?,
                ));
            }
            "recursionlevel" => {
                expect_count(line_num, keyword, &args, 1)?;
                d.recursion_depth = parse_value(line_num, args[0])?;
            }
            "ambient" => {
                let v = parse_numbers(line_num, keyword, &args, 3)?;
                d.ambient = Some(Light::ambient(Color::new(v[0], v[1], v[2])));
            }
            "light" => {
                let v = parse_numbers(line_num, keyword, &args, 7)?;
                if v[3] == 0.0 {
                    log::warn!(
                        "line {}: light with w = 0 (directional) is treated as a point light",
                        line_num
                    );
                }
                d.lights.push(Light::point(
                    Color::new(v[4], v[5], v[6]),
                    Point3::new(v[0], v[1], v[2]),
                ));
            }
            "sphere" => {
                if args.len() != 13 && args.len() != 16 {
                    return Err(DriverError::Parse {
                        line: line_num,
                        message: format!(
                            "expected 13 or 16 values for 'sphere', found {}",
                            args.len()
                        ),
                    });
                }
                let v = parse_numbers(line_num, keyword, &args, args.len())?;
                let rgb = |i: usize| Color::new(v[i], v[i + 1], v[i + 2]);

                let mut material = Material::new(
                    format!("sphere{}", d.spheres.len()),
                    rgb(4),
                    rgb(7),
                    rgb(10),
                    DEFAULT_PHONG,
                );
                if v.len() == 16 {
                    material = material.with_reflectance(rgb(13));
                }
                d.spheres.push(SphereSpec {
                    center: Point3::new(v[0], v[1], v[2]),
                    radius: v[3],
                    material,
                });
            }
            "model" => {
                expect_count(line_num, keyword, &args, 9)?;
                let v = parse_numbers(line_num, keyword, &args[..8], 8)?;
                let placement = Placement::new(
                    Vector3::new(v[0], v[1], v[2]),
                    v[3],
                    v[4],
                    Point3::new(v[5], v[6], v[7]),
                );
                d.models.push(ModelPlacement::new(args[8], placement));
            }
            _ => {
                return Err(DriverError::UnknownDirective {
                    line: line_num,
                    keyword: keyword.to_string(),
                });
            }
        }
        Ok(())
    }

    fn finish(self) -> DriverResult<SceneDescription> {
        let d = self.directives;
        let eye = d.eye.ok_or(DriverError::MissingDirective("eye"))?;
        let look = d.look.ok_or(DriverError::MissingDirective("look"))?;
        let up = d.up.ok_or(DriverError::MissingDirective("up"))?;
        let near = d.near.ok_or(DriverError::MissingDirective("d"))?;
        let bounds = d.bounds.ok_or(DriverError::MissingDirective("bounds"))?;
        let (width, height) = d.res.ok_or(DriverError::MissingDirective("res"))?;

        Ok(SceneDescription {
            camera: CameraSpec::new(eye, look, up, near, bounds),
            width,
            height,
            recursion_depth: d.recursion_depth,
            ambient: d.ambient,
            lights: d.lights,
            spheres: d.spheres,
            models: d.models,
        })
    }
}

fn expect_count(line: usize, keyword: &str, args: &[&str], count: usize) -> DriverResult<()> {
    if args.len() != count {
        return Err(DriverError::Parse {
            line,
            message: format!(
                "expected {} values for '{}', found {}",
                count,
                keyword,
                args.len()
            ),
        });
    }
    Ok(())
}

fn parse_value<T: std::str::FromStr>(line: usize, value: &str) -> DriverResult<T> {
    value.parse::<T>().map_err(|_| DriverError::InvalidNumber {
        line,
        value: value.to_string(),
    })
}

fn parse_numbers(line: usize, keyword: &str, args: &[&str], count: usize) -> DriverResult<Vec<f64>> {
    expect_count(line, keyword, args, count)?;
    args.iter().map(|a| parse_value(line, a)).collect()
}

/// Parse driver file text.
///
/// Model paths are left exactly as written.
pub fn parse_driver(content: &str) -> DriverResult<SceneDescription> {
    DriverParser::new(content).parse()
}

/// Read and parse a driver file. Relative model paths resolve against the
/// driver file's directory.
pub fn load_driver<P: AsRef<Path>>(path: P) -> DriverResult<SceneDescription> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let mut description = parse_driver(&content)?;

    if let Some(dir) = path.parent() {
        description.resolve_model_paths(dir);
    }

    log::info!(
        "Loaded driver {}: {}x{}, {} lights, {} spheres, {} models",
        path.display(),
        description.width,
        description.height,
        description.lights.len(),
        description.spheres.len(),
        description.models.len()
    );
    Ok(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const DRIVER: &str = "\
# A small scene
eye 0 0 0
look 0 0 -1
up 0 1 0
d 1
bounds -1 -2 1 2
res 64 48
recursionlevel 2
ambient 0.1 0.1 0.1

light 0 5 -5 1 1 1 1
light 4 4 4 0 0.5 0.5 0.5
sphere 0 0 -5 1  0.2 0 0  0.8 0 0  0.5 0.5 0.5  0.9 0.9 0.9
sphere 2 0 -5 0.5  0.2 0.2 0.2  0.5 0.5 0.5  0 0 0
model 0 1 0 45 2 0 0 -10 cube.obj
";

    #[test]
    fn test_parse_camera() {
        let desc = parse_driver(DRIVER).unwrap();
        assert_eq!(desc.camera.eye, Point3::ORIGIN);
        assert_eq!(desc.camera.look_at, Point3::new(0.0, 0.0, -1.0));
        assert_eq!(desc.camera.up, Vector3::Y);
        assert_eq!(desc.camera.near, -1.0);
        assert_eq!(desc.camera.bounds, ImageBounds::new(-1.0, 1.0, -2.0, 2.0));
        assert_eq!((desc.width, desc.height), (64, 48));
        assert_eq!(desc.recursion_depth, 2);
    }

    #[test]
    fn test_parse_lights() {
        let desc = parse_driver(DRIVER).unwrap();
        let ambient = desc.ambient.unwrap();
        assert!(ambient.is_ambient());
        assert_eq!(ambient.color, Color::splat(0.1));

        assert_eq!(desc.lights.len(), 2);
        assert_eq!(desc.lights[0].position, Some(Point3::new(0.0, 5.0, -5.0)));
        assert_eq!(desc.lights[1].color, Color::splat(0.5));
    }

    #[test]
    fn test_parse_spheres() {
        let desc = parse_driver(DRIVER).unwrap();
        assert_eq!(desc.spheres.len(), 2);

        let first = &desc.spheres[0];
        assert_eq!(first.center, Point3::new(0.0, 0.0, -5.0));
        assert_eq!(first.radius, 1.0);
        assert_eq!(first.material.diffuse, Color::new(0.8, 0.0, 0.0));
        assert_eq!(first.material.phong, DEFAULT_PHONG);
        assert_eq!(first.material.reflectance, Some(Color::splat(0.9)));

        assert!(desc.spheres[1].material.reflectance.is_none());
    }

    #[test]
    fn test_parse_model() {
        let desc = parse_driver(DRIVER).unwrap();
        assert_eq!(desc.models.len(), 1);
        let model = &desc.models[0];
        assert_eq!(model.path, PathBuf::from("cube.obj"));
        assert_eq!(model.placement.axis, Vector3::Y);
        assert_eq!(model.placement.theta_degrees, 45.0);
        assert_eq!(model.placement.scale, 2.0);
        assert_eq!(model.placement.translation, Point3::new(0.0, 0.0, -10.0));
    }

    #[test]
    fn test_defaults_for_optional_directives() {
        let minimal = "eye 0 0 5\nlook 0 0 0\nup 0 1 0\nd 2\nbounds -1 -1 1 1\nres 10 10\n";
        let desc = parse_driver(minimal).unwrap();
        assert_eq!(desc.recursion_depth, 0);
        assert!(desc.ambient.is_none());
        assert!(desc.lights.is_empty());
        assert!(desc.spheres.is_empty());
        assert!(desc.models.is_empty());
    }

    #[test]
    fn test_missing_directive() {
        let result = parse_driver("eye 0 0 5\nlook 0 0 0\nup 0 1 0\nd 2\nres 10 10\n");
        assert!(matches!(result, Err(DriverError::MissingDirective("bounds"))));
    }

    #[test]
    fn test_unknown_directive() {
        let result = parse_driver("eye 0 0 5\ncamera 1 2 3\n");
        match result {
            Err(DriverError::UnknownDirective { line, keyword }) => {
                assert_eq!(line, 2);
                assert_eq!(keyword, "camera");
            }
            other => panic!("expected unknown directive, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_number() {
        let result = parse_driver("# header\neye 0 zero 5\n");
        match result {
            Err(DriverError::InvalidNumber { line, value }) => {
                assert_eq!(line, 2);
                assert_eq!(value, "zero");
            }
            other => panic!("expected invalid number, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_arity() {
        assert!(matches!(
            parse_driver("eye 0 0\n"),
            Err(DriverError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            parse_driver("sphere 0 0 0 1\n"),
            Err(DriverError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_negative_resolution_rejected() {
        let result = parse_driver("res -5 10\n");
        assert!(matches!(result, Err(DriverError::InvalidNumber { line: 1, .. })));
    }
}
