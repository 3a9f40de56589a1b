//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in world coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let dir1 = Vec2::from_angle(theta1);
        let dir2 = Vec2::from_angle(theta2);
        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Axis-aligned rectangle given in a local frame, then rotated by `angle`
/// around `origin`. `min`/`max` are local-frame corners.
pub fn oriented_rect(origin: Vec2, angle: f32, min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let rot = Vec2::from_angle(angle);
    let corners = [
        Vec2::new(min.x, min.y),
        Vec2::new(max.x, min.y),
        Vec2::new(max.x, max.y),
        Vec2::new(min.x, max.y),
    ]
    .map(|local| origin + rot.rotate(local));

    quad(corners, color)
}

/// A straight line of the given thickness between two points
pub fn line(from: Vec2, to: Vec2, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    let half = dir.perp() * (thickness / 2.0);
    quad([from + half, to + half, to - half, from - half], color)
}

fn quad(corners: [Vec2; 4], color: [f32; 4]) -> Vec<Vertex> {
    let [a, b, c, d] = corners;
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
        Vertex::new(a.x, a.y, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_circle_vertex_count_and_radius() {
        let center = Vec2::new(10.0, 20.0);
        let verts = circle(center, 5.0, WHITE, 16);
        assert_eq!(verts.len(), 48);
        for v in &verts {
            let p = Vec2::from(v.position);
            let d = p.distance(center);
            assert!(d < 1e-4 || (d - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_ring_vertex_count() {
        assert_eq!(ring(Vec2::ZERO, 4.0, 5.0, WHITE, 12).len(), 72);
    }

    #[test]
    fn test_oriented_rect_rotation() {
        // Unit-wide bar pointing right, rotated a quarter turn: it now points down (+y)
        let verts = oriented_rect(
            Vec2::ZERO,
            std::f32::consts::FRAC_PI_2,
            Vec2::new(0.0, -1.0),
            Vec2::new(10.0, 1.0),
            WHITE,
        );
        assert_eq!(verts.len(), 6);
        let max_y = verts.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        let max_x = verts.iter().map(|v| v.position[0].abs()).fold(0.0, f32::max);
        assert!((max_y - 10.0).abs() < 1e-4);
        assert!((max_x - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_line_thickness() {
        let verts = line(Vec2::ZERO, Vec2::new(0.0, 100.0), 2.0, WHITE);
        assert_eq!(verts.len(), 6);
        for v in &verts {
            assert!((v.position[0].abs() - 1.0).abs() < 1e-6);
        }
    }
}
