use super::tilegrid::TileGrid;

/// Minimal physics record for one actor. Owned by exactly one actor;
/// only that actor and [`resolve_collision`] mutate it. Width and
/// height are fixed after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub vx: f32,
    pub vy: f32,
    pub on_ground: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            vx: 0.0,
            vy: 0.0,
            on_ground: false,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width * 0.5
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Half-open interval test: rectangles that merely touch along an edge
/// do not overlap.
pub fn aabb_overlap(a: &Aabb, b: &Aabb) -> bool {
    a.x + a.width > b.x && a.x < b.x + b.width && a.y + a.height > b.y && a.y < b.y + b.height
}

/// Integrate one discrete step against the grid, vertical axis strictly
/// before horizontal. Edge probes are inset 1 px from each side so a
/// body flush against a wall does not register a false floor hit.
/// Corner sampling can miss collisions for bodies thinner than one tile
/// at extreme speeds; that limitation is part of the contract.
pub fn resolve_collision(body: &mut Body, grid: &TileGrid, dt: f32) {
    let tile_w = grid.tile_width() as f32;
    let tile_h = grid.tile_height() as f32;

    body.y += body.vy * dt;

    if body.vy > 0.0 {
        // falling
        let bottom = body.y + body.height;
        if grid.is_solid_at_world(body.x + 1.0, bottom)
            || grid.is_solid_at_world(body.x + body.width - 1.0, bottom)
        {
            body.y = (bottom / tile_h).floor() * tile_h - body.height;
            body.vy = 0.0;
            body.on_ground = true;
        } else {
            body.on_ground = false;
        }
    }

    if body.vy < 0.0 {
        // rising
        if grid.is_solid_at_world(body.x + 1.0, body.y)
            || grid.is_solid_at_world(body.x + body.width - 1.0, body.y)
        {
            body.y = ((body.y + tile_h) / tile_h).floor() * tile_h;
            body.vy = 0.0;
        }
    }

    body.x += body.vx * dt;

    if body.vx > 0.0 {
        let right = body.x + body.width;
        if grid.is_solid_at_world(right, body.y + 1.0)
            || grid.is_solid_at_world(right, body.y + body.height - 1.0)
        {
            body.x = (right / tile_w).floor() * tile_w - body.width;
            body.vx = 0.0;
        }
    }
    if body.vx < 0.0
        && (grid.is_solid_at_world(body.x, body.y + 1.0)
            || grid.is_solid_at_world(body.x, body.y + body.height - 1.0))
    {
        body.x = (body.x / tile_w + 1.0).floor() * tile_w;
        body.vx = 0.0;
    }

    // Authoritative standing check, run even when the body did not move
    // vertically this step.
    let foot_y = body.y + body.height + 1.0;
    body.on_ground = grid.is_solid_at_world(body.x + 1.0, foot_y)
        || grid.is_solid_at_world(body.x + body.width - 1.0, foot_y);
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    /// 6x6 map of 32px tiles: solid floor on row 4, solid walls in
    /// column 0 and column 5 above the floor.
    fn room_grid() -> TileGrid {
        let mut cells = vec![0u32; 36];
        for x in 0..6 {
            cells[4 * 6 + x] = 1;
        }
        for y in 0..4 {
            cells[y * 6] = 1;
            cells[y * 6 + 5] = 1;
        }
        TileGrid::from_cells(6, 6, 32, 32, &cells).expect("grid")
    }

    #[test]
    fn falling_body_snaps_to_tile_boundary() {
        let grid = room_grid();
        // Floor row is tile row 4 (top edge at y = 128).
        let mut body = Body::new(64.0, 4.0 * 32.0 - 40.0 - 5.0, 20.0, 40.0);
        body.vy = 500.0;

        resolve_collision(&mut body, &grid, DT);

        assert_eq!(body.y, 4.0 * 32.0 - 40.0);
        assert_eq!(body.vy, 0.0);
        assert!(body.on_ground);
    }

    #[test]
    fn airborne_body_reports_not_grounded() {
        let grid = room_grid();
        let mut body = Body::new(64.0, 10.0, 20.0, 40.0);
        body.vy = 10.0;

        resolve_collision(&mut body, &grid, DT);

        assert!(!body.on_ground);
        assert!(body.vy > 0.0);
    }

    #[test]
    fn standing_still_body_is_still_grounded() {
        let grid = room_grid();
        let mut body = Body::new(64.0, 128.0 - 40.0, 20.0, 40.0);

        resolve_collision(&mut body, &grid, DT);

        assert!(body.on_ground);
        assert_eq!(body.y, 128.0 - 40.0);
    }

    #[test]
    fn rising_body_bumps_ceiling_and_stops() {
        let mut cells = vec![0u32; 36];
        for x in 0..6 {
            cells[x] = 1; // ceiling row 0
            cells[4 * 6 + x] = 1; // floor row 4
        }
        let grid = TileGrid::from_cells(6, 6, 32, 32, &cells).expect("grid");
        let mut body = Body::new(64.0, 34.0, 20.0, 40.0);
        body.vy = -600.0;

        resolve_collision(&mut body, &grid, DT);

        assert_eq!(body.y, 32.0);
        assert_eq!(body.vy, 0.0);
    }

    #[test]
    fn rightward_body_stops_at_wall() {
        let grid = room_grid();
        let mut body = Body::new(130.0, 128.0 - 40.0, 20.0, 40.0);
        body.vx = 900.0;

        resolve_collision(&mut body, &grid, DT);

        // Wall column 5 starts at x = 160; right edge snaps onto it.
        assert_eq!(body.x, 160.0 - 20.0);
        assert_eq!(body.vx, 0.0);
    }

    #[test]
    fn leftward_body_stops_at_wall() {
        let grid = room_grid();
        let mut body = Body::new(40.0, 128.0 - 40.0, 20.0, 40.0);
        body.vx = -900.0;

        resolve_collision(&mut body, &grid, DT);

        // Wall column 0 ends at x = 32; left edge snaps onto it.
        assert_eq!(body.x, 32.0);
        assert_eq!(body.vx, 0.0);
    }

    #[test]
    fn body_walks_off_open_level_edge() {
        let mut cells = vec![0u32; 36];
        for x in 0..6 {
            cells[4 * 6 + x] = 1;
        }
        let grid = TileGrid::from_cells(6, 6, 32, 32, &cells).expect("grid");
        let mut body = Body::new(180.0, 128.0 - 40.0, 20.0, 40.0);
        body.vx = 300.0;

        resolve_collision(&mut body, &grid, DT);

        // No wall at the map boundary; out-of-bounds is passable.
        assert!(body.x > 180.0);
        assert_eq!(body.vx, 300.0);
    }

    #[test]
    fn aabb_touching_edges_do_not_overlap() {
        let a = Aabb {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        let b = Aabb {
            x: 10.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        let c = Aabb {
            x: 0.0,
            y: 10.0,
            width: 10.0,
            height: 10.0,
        };
        assert!(!aabb_overlap(&a, &b));
        assert!(!aabb_overlap(&a, &c));
    }

    #[test]
    fn aabb_positive_area_intersection_overlaps() {
        let a = Aabb {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        let b = Aabb {
            x: 9.9,
            y: 9.9,
            width: 10.0,
            height: 10.0,
        };
        assert!(aabb_overlap(&a, &b));
        assert!(aabb_overlap(&b, &a));
    }

    #[test]
    fn body_center_x_is_midpoint() {
        let body = Body::new(90.0, 0.0, 20.0, 40.0);
        assert_eq!(body.center_x(), 100.0);
    }
}
