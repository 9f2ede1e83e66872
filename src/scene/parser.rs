//! Scene text parser.
//!
//! Vertex definitions are collected before any draw command is resolved, so a
//! command may reference a vertex declared later in the text. Every error
//! names the command it came from.

use super::{DrawCommand, Scene};
use crate::color::Color;
use crate::error::{Error, Result};
use crate::geometry::{Point, Vertex};
use std::num::IntErrorKind;

/// Separator between commands.
const COMMAND_SEPARATOR: char = ';';
/// Separator between the fields of a command.
const FIELD_SEPARATOR: char = ',';

/// Parse scene text into vertices and validated draw commands.
///
/// # Errors
///
/// - [`Error::UnknownCommand`] for a tag other than `v`, `p`, `l`, `t`
/// - [`Error::FieldCount`] for a command with the wrong number of fields
/// - [`Error::MalformedField`] for a field that is not a valid number
/// - [`Error::InvalidVertexIndex`] for a reference to an undeclared vertex
///
/// # Example
///
/// ```rust
/// use trueno_raster::scene::{parse_scene, DrawCommand};
///
/// let scene = parse_scene("v,1,1,1,0,0; p,0;").unwrap();
/// assert_eq!(scene.vertices().len(), 1);
/// assert_eq!(scene.commands(), &[DrawCommand::Point { v: 0 }]);
/// ```
pub fn parse_scene(text: &str) -> Result<Scene> {
    let mut vertex_lines = Vec::new();
    let mut draw_lines = Vec::new();

    for command in text.split(COMMAND_SEPARATOR).map(str::trim).filter(|c| !c.is_empty()) {
        let tag = command.split(FIELD_SEPARATOR).next().unwrap_or_default().trim();
        match tag {
            "v" => vertex_lines.push(command),
            "p" | "l" | "t" => draw_lines.push(command),
            _ => return Err(Error::UnknownCommand { command: command.to_string() }),
        }
    }

    let vertices = vertex_lines.into_iter().map(parse_vertex).collect::<Result<Vec<_>>>()?;

    let commands = draw_lines
        .into_iter()
        .map(|command| parse_draw_command(command, vertices.len()))
        .collect::<Result<Vec<_>>>()?;

    log::debug!("parsed scene: {} vertices, {} draw commands", vertices.len(), commands.len());
    Ok(Scene::from_validated(vertices, commands))
}

/// Fields after the tag, trimmed, checked against the expected count.
fn fields(command: &str, expected: usize) -> Result<Vec<&str>> {
    let fields: Vec<&str> = command.split(FIELD_SEPARATOR).skip(1).map(str::trim).collect();
    if fields.len() != expected {
        return Err(Error::FieldCount {
            command: command.to_string(),
            expected,
            found: fields.len(),
        });
    }
    Ok(fields)
}

/// `v,x,y,r,g,b`
fn parse_vertex(command: &str) -> Result<Vertex> {
    let f = fields(command, 5)?;

    let x = parse_real(command, f[0])?;
    let y = parse_real(command, f[1])?;
    let color = Color::new(
        parse_component(command, f[2])?,
        parse_component(command, f[3])?,
        parse_component(command, f[4])?,
    );

    Ok(Vertex::new(Point::new(x, y), color))
}

/// `p,i` / `l,i,j` / `t,i,j,k`
fn parse_draw_command(command: &str, vertex_count: usize) -> Result<DrawCommand> {
    let index = |field: &str| parse_index(command, field, vertex_count);

    let cmd = match command.split(FIELD_SEPARATOR).next().unwrap_or_default().trim() {
        "p" => {
            let f = fields(command, 1)?;
            DrawCommand::Point { v: index(f[0])? }
        }
        "l" => {
            let f = fields(command, 2)?;
            DrawCommand::Line { v1: index(f[0])?, v2: index(f[1])? }
        }
        "t" => {
            let f = fields(command, 3)?;
            DrawCommand::Triangle { v1: index(f[0])?, v2: index(f[1])?, v3: index(f[2])? }
        }
        _ => return Err(Error::UnknownCommand { command: command.to_string() }),
    };

    Ok(cmd)
}

fn malformed(command: &str, field: &str, reason: impl Into<String>) -> Error {
    Error::MalformedField {
        command: command.to_string(),
        field: field.to_string(),
        reason: reason.into(),
    }
}

/// Strict decimal real; infinities and NaN are rejected.
fn parse_real(command: &str, field: &str) -> Result<f32> {
    let value: f32 = field.parse().map_err(|e| malformed(command, field, format!("{e}")))?;
    if !value.is_finite() {
        return Err(malformed(command, field, "not a finite number"));
    }
    Ok(value)
}

/// A real in `[0, 1]`.
fn parse_component(command: &str, field: &str) -> Result<f32> {
    let value = parse_real(command, field)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(malformed(command, field, "color component outside [0, 1]"));
    }
    Ok(value)
}

/// Strict integer vertex reference, checked against the declared vertices.
///
/// A well-formed integer too large for `i64` is still an out-of-range index,
/// reported saturated to `i64::MAX` or `i64::MIN`.
fn parse_index(command: &str, field: &str, vertex_count: usize) -> Result<usize> {
    let invalid = |index: i64| Error::InvalidVertexIndex {
        command: command.to_string(),
        index,
        count: vertex_count,
    };

    let index: i64 = match field.parse() {
        Ok(index) => index,
        Err(e) => {
            return Err(match e.kind() {
                IntErrorKind::PosOverflow => invalid(i64::MAX),
                IntErrorKind::NegOverflow => invalid(i64::MIN),
                _ => malformed(command, field, format!("{e}")),
            });
        }
    };

    usize::try_from(index).ok().filter(|&i| i < vertex_count).ok_or_else(|| invalid(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vertices_and_commands() {
        let scene = parse_scene("v,0,0,1,0,0;v,3,0,0,0,1;v,0,3,0,1,0;t,0,1,2;l,0,1;p,2;").unwrap();

        assert_eq!(scene.vertices().len(), 3);
        assert_eq!(scene.vertices()[1], Vertex::from_parts(3.0, 0.0, 0.0, 0.0, 1.0));
        assert_eq!(
            scene.commands(),
            &[
                DrawCommand::Triangle { v1: 0, v2: 1, v3: 2 },
                DrawCommand::Line { v1: 0, v2: 1 },
                DrawCommand::Point { v: 2 },
            ]
        );
    }

    #[test]
    fn test_whitespace_insignificant() {
        let scene = parse_scene("  v , 1.5 ,2, 0.25,0.5 , 1 ;\n\t p , 0 ;  ").unwrap();
        assert_eq!(scene.vertices()[0], Vertex::from_parts(1.5, 2.0, 0.25, 0.5, 1.0));
        assert_eq!(scene.commands(), &[DrawCommand::Point { v: 0 }]);
    }

    #[test]
    fn test_vertex_declared_after_use() {
        let scene = parse_scene("p,1;v,0,0,1,1,1;v,1,1,0,0,0").unwrap();
        assert_eq!(scene.commands(), &[DrawCommand::Point { v: 1 }]);
    }

    #[test]
    fn test_empty_scene() {
        let scene = parse_scene(" ; ;\n").unwrap();
        assert!(scene.vertices().is_empty());
        assert!(scene.commands().is_empty());
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_scene("v,0,0,1,1,1;q,0").unwrap_err();
        assert!(matches!(err, Error::UnknownCommand { ref command } if command == "q,0"));
    }

    #[test]
    fn test_tag_must_be_exact() {
        assert!(matches!(parse_scene("vx,0,0,1,1,1"), Err(Error::UnknownCommand { .. })));
        assert!(matches!(parse_scene("point,0"), Err(Error::UnknownCommand { .. })));
    }

    #[test]
    fn test_malformed_real() {
        let err = parse_scene("v,0,abc,1,1,1").unwrap_err();
        match err {
            Error::MalformedField { command, field, .. } => {
                assert_eq!(command, "v,0,abc,1,1,1");
                assert_eq!(field, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(parse_scene("v,inf,0,1,1,1"), Err(Error::MalformedField { .. })));
        assert!(matches!(parse_scene("v,0,NaN,1,1,1"), Err(Error::MalformedField { .. })));
    }

    #[test]
    fn test_color_out_of_range() {
        let err = parse_scene("v,0,0,255,0,0").unwrap_err();
        assert!(matches!(err, Error::MalformedField { ref field, .. } if field == "255"));
    }

    #[test]
    fn test_fractional_index_malformed() {
        let err = parse_scene("v,0,0,1,1,1;p,0.5").unwrap_err();
        assert!(matches!(err, Error::MalformedField { ref field, .. } if field == "0.5"));
    }

    #[test]
    fn test_field_count() {
        let err = parse_scene("v,0,0,1,1").unwrap_err();
        assert!(matches!(err, Error::FieldCount { expected: 5, found: 4, .. }));

        let err = parse_scene("v,0,0,1,1,1;l,0").unwrap_err();
        assert!(matches!(err, Error::FieldCount { expected: 2, found: 1, .. }));
    }

    #[test]
    fn test_invalid_vertex_index() {
        let err = parse_scene("v,0,0,1,1,1;v,1,1,1,1,1;v,2,2,1,1,1;t,0,1,5").unwrap_err();
        assert!(matches!(err, Error::InvalidVertexIndex { index: 5, count: 3, .. }));
    }

    #[test]
    fn test_overflowing_vertex_index() {
        let err = parse_scene("v,0,0,1,1,1;p,99999999999999999999").unwrap_err();
        assert!(matches!(err, Error::InvalidVertexIndex { index: i64::MAX, count: 1, .. }));

        let err = parse_scene("v,0,0,1,1,1;l,0,-99999999999999999999").unwrap_err();
        assert!(matches!(err, Error::InvalidVertexIndex { index: i64::MIN, count: 1, .. }));

        let err = parse_scene("v,0,0,1,1,1;p,9999999999999999999x").unwrap_err();
        assert!(matches!(err, Error::MalformedField { .. }));
    }

    #[test]
    fn test_negative_vertex_index() {
        let err = parse_scene("v,0,0,1,1,1;p,-1").unwrap_err();
        assert!(matches!(err, Error::InvalidVertexIndex { index: -1, count: 1, .. }));
    }
}
