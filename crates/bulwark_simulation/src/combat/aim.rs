//! Прицеливание игрока: точка выстрела на высоте игрока
//!
//! Луч камеры (P1 = позиция камеры, P2 = точка попадания в пол) задаёт прямую.
//! Ищем на ней точку с Y = высоте игрока: X из уравнения y = a·x + b
//! (метод Крамера по двум точкам), Z из уравнения z = a'·x + b'.

use bevy::prelude::*;

const EPSILON: f32 = 1e-6;

/// Уравнение прямой y = a·x + b через P1 и P2 (проекция на XY)
///
/// Возвращает (a, b). None если определитель = 0 (P1.x == P2.x).
pub fn compute_linear_equation(p1: Vec3, p2: Vec3) -> Option<Vec2> {
    // | P1.x  1 |
    // | P2.x  1 |
    let det = p1.x - p2.x;
    if det.abs() < EPSILON {
        return None;
    }

    let a = (p1.y - p2.y) / det;
    let b = (p1.x * p2.y - p2.x * p1.y) / det;
    Some(Vec2::new(a, b))
}

/// Точка на прямой P1→P2 с заданной высотой `target_y`
///
/// Вырожденные случаи (вертикальная в XY проекции прямая, горизонтальный
/// луч) решаются параметрически. None если луч параллелен полу.
pub fn compute_shot_point_for_player(target_y: f32, p1: Vec3, p2: Vec3) -> Option<Vec3> {
    let for_y = compute_linear_equation(p1, p2);
    let for_z = compute_linear_equation(Vec3::new(p1.x, p1.z, p1.y), Vec3::new(p2.x, p2.z, p2.y));

    if let (Some(for_y), Some(for_z)) = (for_y, for_z) {
        if for_y.x.abs() > EPSILON {
            // Y = a·X + b → X = (Y - b) / a
            let target_x = (target_y - for_y.y) / for_y.x;
            // Z = a'·X + b'
            let target_z = for_z.x * target_x + for_z.y;
            return Some(Vec3::new(target_x, target_y, target_z));
        }
    }

    let dy = p2.y - p1.y;
    if dy.abs() < EPSILON {
        return None;
    }
    let t = (target_y - p1.y) / dy;
    Some(p1 + (p2 - p1) * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1e-4
    }

    #[test]
    fn test_linear_equation_through_two_points() {
        let line = compute_linear_equation(Vec3::new(0.0, 10.0, 0.0), Vec3::new(4.0, 0.0, 0.0))
            .expect("non-degenerate");
        assert!((line.x - -2.5).abs() < 1e-5);
        assert!((line.y - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_linear_equation_degenerate() {
        assert!(compute_linear_equation(Vec3::new(1.0, 10.0, 0.0), Vec3::new(1.0, 0.0, 5.0)).is_none());
    }

    #[test]
    fn test_shot_point_matches_parametric_solution() {
        let camera = Vec3::new(0.0, 10.0, -8.0);
        let floor_hit = Vec3::new(4.0, 0.0, 2.0);

        let point = compute_shot_point_for_player(0.9, camera, floor_hit).expect("solvable");
        assert!(approx(point, Vec3::new(3.64, 0.9, 1.1)), "point = {:?}", point);
    }

    #[test]
    fn test_shot_point_vertical_plane_falls_back() {
        // Камера строго над линией X = 2 — Крамер по X вырожден
        let camera = Vec3::new(2.0, 10.0, -8.0);
        let floor_hit = Vec3::new(2.0, 0.0, 2.0);

        let point = compute_shot_point_for_player(5.0, camera, floor_hit).expect("parametric fallback");
        assert!(approx(point, Vec3::new(2.0, 5.0, -3.0)), "point = {:?}", point);
    }

    #[test]
    fn test_shot_point_parallel_to_floor() {
        let p1 = Vec3::new(0.0, 1.0, 0.0);
        let p2 = Vec3::new(5.0, 1.0, 5.0);
        assert!(compute_shot_point_for_player(0.9, p1, p2).is_none());
    }
}
