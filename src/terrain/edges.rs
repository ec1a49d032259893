//! Wireframe line list derived from a triangle list.

/// Three edges per triangle, `(a,b) (b,c) (c,a)`, in triangle order.
///
/// Edges shared by neighbouring triangles appear once per triangle.
pub fn edges_from_triangles(triangles: &[[u32; 3]]) -> Vec<[u32; 2]> {
    triangles
        .iter()
        .flat_map(|&[a, b, c]| [[a, b], [b, c], [c, a]])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_three_edges_per_triangle_in_order() {
        let edges = edges_from_triangles(&[[0, 1, 2], [1, 3, 2]]);
        assert_eq!(edges, vec![[0, 1], [1, 2], [2, 0], [1, 3], [3, 2], [2, 1]]);
    }

    #[test]
    fn empty_input_gives_no_edges() {
        assert!(edges_from_triangles(&[]).is_empty());
    }
}
