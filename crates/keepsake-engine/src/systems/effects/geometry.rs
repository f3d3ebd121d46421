//! Triangle strip mesh generation for particles and shell trails.

use glam::Vec2;
use super::palette::Hue;

/// Floats per effects vertex: x, y, hue index, u, v.
pub const FLOATS_PER_VERTEX: usize = 5;

/// Generate triangle strip vertices from a polyline.
/// Output: Vec of [x, y, z, u, v] floats (5 per vertex), z carrying the hue index.
pub fn build_strip_vertices(points: &[Vec2], width: f32, hue: Hue) -> Vec<f32> {
    if points.len() < 2 {
        return Vec::new();
    }

    let n = points.len();
    let mut verts = Vec::with_capacity((n + 2) * 2 * FLOATS_PER_VERTEX);

    let dir = |a: Vec2, b: Vec2| -> (Vec2, Vec2) {
        let d = (b - a).try_normalize().unwrap_or(Vec2::X);
        (d, d.perp())
    };

    let z = hue.index();

    let push_pair = |verts: &mut Vec<f32>, center: Vec2, perp: Vec2, v: f32| {
        let left = center + perp * width;
        let right = center - perp * width;
        verts.extend_from_slice(&[left.x, left.y, z, 0.0, v]);
        verts.extend_from_slice(&[right.x, right.y, z, 1.0, v]);
    };

    // Start cap
    let (d0, p0) = dir(points[0], points[1]);
    push_pair(&mut verts, points[0] - d0 * width, p0, 0.0);
    push_pair(&mut verts, points[0], p0, 1.0);

    for i in 1..n - 1 {
        let (_, p_prev) = dir(points[i - 1], points[i]);
        let (_, p_next) = dir(points[i], points[i + 1]);
        let perp = (p_prev + p_next).try_normalize().unwrap_or(p_next);
        push_pair(&mut verts, points[i], perp, 1.0);
    }

    // End cap
    let (d_last, p_last) = dir(points[n - 2], points[n - 1]);
    push_pair(&mut verts, points[n - 1], p_last, 1.0);
    push_pair(&mut verts, points[n - 1] + d_last * width, p_last, 0.0);

    verts
}

/// Convert triangle strip vertices to a triangle list (for WebGPU compatibility).
pub fn strip_to_triangles(strip_verts: &[f32], floats_per_vert: usize) -> Vec<f32> {
    let num_verts = strip_verts.len() / floats_per_vert;
    if num_verts < 3 {
        return Vec::new();
    }
    let num_tris = num_verts - 2;
    let mut out = Vec::with_capacity(num_tris * 3 * floats_per_vert);
    for i in 0..num_tris {
        let (a, b, c) = if i % 2 == 0 {
            (i, i + 1, i + 2)
        } else {
            (i + 1, i, i + 2)
        };
        for idx in [a, b, c] {
            let base = idx * floats_per_vert;
            out.extend_from_slice(&strip_verts[base..base + floats_per_vert]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_vertices_for_simple_line() {
        let points = [Vec2::ZERO, Vec2::new(100.0, 0.0)];
        let verts = build_strip_vertices(&points, 4.0, Hue::Rose);
        // 2 points + 2 caps = 4 vertex pairs
        assert_eq!(verts.len(), 8 * FLOATS_PER_VERTEX);
    }

    #[test]
    fn strip_to_triangles_correct_count() {
        let strip = vec![0.0; 6 * FLOATS_PER_VERTEX];
        let tris = strip_to_triangles(&strip, FLOATS_PER_VERTEX);
        assert_eq!(tris.len() / FLOATS_PER_VERTEX, 12);
    }

    #[test]
    fn degenerate_polylines_are_empty() {
        assert!(build_strip_vertices(&[], 4.0, Hue::Gold).is_empty());
        assert!(build_strip_vertices(&[Vec2::ZERO], 4.0, Hue::Gold).is_empty());
    }

    #[test]
    fn hue_lands_in_z_channel() {
        let verts = build_strip_vertices(&[Vec2::ZERO, Vec2::X * 10.0], 1.0, Hue::Sky);
        assert_eq!(verts[2], Hue::Sky.index());
    }
}
