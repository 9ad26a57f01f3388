//! The shape rasterizer: converts geometric primitives into per-voxel
//! [`Painter::paint`] calls.
//!
//! Every shape operation reduces to repeated `paint` calls; there is no
//! batching or transactional grouping, so a failure mid-shape leaves the
//! voxels already committed in place. A [`PaintSession`] is immutable and
//! single-job-exclusive; never share one across concurrently running jobs.

use std::f64::consts::TAU;
use std::sync::Arc;

use hexworld_block::BlockDef;
use hexworld_world::WorldId;

use crate::sink::{EditError, EditSink, SelectionFeedback};
use crate::strategy::PaintStrategy;

/// Default selection highlight, RGBA.
const DEFAULT_HIGHLIGHT: u32 = 0xFF_CC_00_FF;

/// Immutable per-shape painting state.
///
/// Construct one per job or shape call and thread it through; sessions are
/// cheap and must not be reused across threads mid-paint.
#[derive(Clone)]
pub struct PaintSession {
    /// Template stamped onto every committed voxel.
    pub template: BlockDef,
    /// Target world.
    pub world: WorldId,
    /// Storage identifier of the target layer.
    pub layer_data_id: String,
    /// Model name forwarded with each edit.
    pub model: String,
    /// Edit group id; all voxels of one session share it.
    pub group_id: i64,
    /// Predicate deciding which candidate voxels commit.
    pub strategy: Arc<dyn PaintStrategy>,
    /// RGBA color for selection feedback.
    pub highlight_color: u32,
}

impl PaintSession {
    pub fn new(
        template: BlockDef,
        world: WorldId,
        layer_data_id: impl Into<String>,
        model: impl Into<String>,
        group_id: i64,
        strategy: Arc<dyn PaintStrategy>,
    ) -> Self {
        Self {
            template,
            world,
            layer_data_id: layer_data_id.into(),
            model: model.into(),
            group_id,
            strategy,
            highlight_color: DEFAULT_HIGHLIGHT,
        }
    }

    pub fn with_highlight_color(mut self, color: u32) -> Self {
        self.highlight_color = color;
        self
    }
}

/// Rasterizes shapes into a session's edit sink.
pub struct Painter<'a> {
    session: &'a PaintSession,
    sink: &'a mut dyn EditSink,
    feedback: Option<&'a mut dyn SelectionFeedback>,
}

impl<'a> Painter<'a> {
    pub fn new(session: &'a PaintSession, sink: &'a mut dyn EditSink) -> Self {
        Self {
            session,
            sink,
            feedback: None,
        }
    }

    /// Attaches a selection-feedback sink that receives every committed
    /// coordinate with the session's highlight color.
    pub fn with_feedback(mut self, feedback: &'a mut dyn SelectionFeedback) -> Self {
        self.feedback = Some(feedback);
        self
    }

    /// The atomic paint unit.
    ///
    /// Offers the coordinate to the strategy; on commit, stamps the template
    /// into a fresh block at the position and forwards it to the sink with
    /// the session's world, layer, model, and group id.
    pub fn paint(&mut self, x: i32, y: i32, z: i32) -> Result<(), EditError> {
        if !self.session.strategy.should_commit(x, y, z) {
            return Ok(());
        }
        let block = self.session.template.block_at(x, y, z);
        self.sink.commit_block(
            self.session.world,
            &self.session.layer_data_id,
            &self.session.model,
            block,
            self.session.group_id,
        )?;
        if let Some(feedback) = self.feedback.as_mut() {
            feedback.highlight(x, y, z, self.session.highlight_color);
        }
        Ok(())
    }

    // -- box shapes ---------------------------------------------------------

    /// Solid box: paints every coordinate in
    /// `[x, x+sx) × [y, y+sy) × [z, z+sz)`.
    pub fn cube(&mut self, x: i32, y: i32, z: i32, sx: i32, sy: i32, sz: i32) -> Result<(), EditError> {
        for dx in 0..sx {
            for dy in 0..sy {
                for dz in 0..sz {
                    self.paint(x + dx, y + dy, z + dz)?;
                }
            }
        }
        Ok(())
    }

    /// Hollow box: bottom and top planes painted fully, intermediate levels
    /// reduced to their perimeter.
    pub fn cube_outline(&mut self, x: i32, y: i32, z: i32, sx: i32, sy: i32, sz: i32) -> Result<(), EditError> {
        for dy in 0..sy {
            if dy == 0 || dy == sy - 1 {
                self.rectangle_y(x, y + dy, z, sx, sz)?;
            } else {
                self.rectangle_outline_y(x, y + dy, z, sx, sz)?;
            }
        }
        Ok(())
    }

    // -- lines --------------------------------------------------------------

    /// Straight line between two points, sampled once per step along the
    /// dominant axis with each coordinate rounded to the nearest block.
    /// A degenerate line paints a single point.
    pub fn line(&mut self, x1: i32, y1: i32, z1: i32, x2: i32, y2: i32, z2: i32) -> Result<(), EditError> {
        let steps = (x2 - x1).abs().max((y2 - y1).abs()).max((z2 - z1).abs());
        if steps == 0 {
            return self.paint(x1, y1, z1);
        }
        let (dx, dy, dz) = (
            (x2 - x1) as f64,
            (y2 - y1) as f64,
            (z2 - z1) as f64,
        );
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.paint(
                x1 + (dx * t).round() as i32,
                y1 + (dy * t).round() as i32,
                z1 + (dz * t).round() as i32,
            )?;
        }
        Ok(())
    }

    // -- rectangles ---------------------------------------------------------

    /// Filled axis-aligned rectangle on the XZ plane (unit thickness in Y).
    pub fn rectangle_y(&mut self, x: i32, y: i32, z: i32, sx: i32, sz: i32) -> Result<(), EditError> {
        self.cube(x, y, z, sx, 1, sz)
    }

    /// Filled axis-aligned rectangle on the YZ plane (unit thickness in X).
    pub fn rectangle_x(&mut self, x: i32, y: i32, z: i32, sy: i32, sz: i32) -> Result<(), EditError> {
        self.cube(x, y, z, 1, sy, sz)
    }

    /// Filled axis-aligned rectangle on the XY plane (unit thickness in Z).
    pub fn rectangle_z(&mut self, x: i32, y: i32, z: i32, sx: i32, sy: i32) -> Result<(), EditError> {
        self.cube(x, y, z, sx, sy, 1)
    }

    /// Rectangle perimeter on the XZ plane; corners painted exactly once.
    pub fn rectangle_outline_y(&mut self, x: i32, y: i32, z: i32, sx: i32, sz: i32) -> Result<(), EditError> {
        for dx in 0..sx {
            self.paint(x + dx, y, z)?;
            if sz > 1 {
                self.paint(x + dx, y, z + sz - 1)?;
            }
        }
        for dz in 1..sz - 1 {
            self.paint(x, y, z + dz)?;
            if sx > 1 {
                self.paint(x + sx - 1, y, z + dz)?;
            }
        }
        Ok(())
    }

    /// Rectangle perimeter on the YZ plane; corners painted exactly once.
    pub fn rectangle_outline_x(&mut self, x: i32, y: i32, z: i32, sy: i32, sz: i32) -> Result<(), EditError> {
        for dy in 0..sy {
            self.paint(x, y + dy, z)?;
            if sz > 1 {
                self.paint(x, y + dy, z + sz - 1)?;
            }
        }
        for dz in 1..sz - 1 {
            self.paint(x, y, z + dz)?;
            if sy > 1 {
                self.paint(x, y + sy - 1, z + dz)?;
            }
        }
        Ok(())
    }

    /// Rectangle perimeter on the XY plane; corners painted exactly once.
    pub fn rectangle_outline_z(&mut self, x: i32, y: i32, z: i32, sx: i32, sy: i32) -> Result<(), EditError> {
        for dx in 0..sx {
            self.paint(x + dx, y, z)?;
            if sy > 1 {
                self.paint(x + dx, y + sy - 1, z)?;
            }
        }
        for dy in 1..sy - 1 {
            self.paint(x, y + dy, z)?;
            if sx > 1 {
                self.paint(x + sx - 1, y + dy, z)?;
            }
        }
        Ok(())
    }

    // -- circles ------------------------------------------------------------

    /// Filled disk on the XZ plane: every `(dx, dz)` with
    /// `dx² + dz² ≤ radius²`.
    pub fn circle_y(&mut self, x: i32, y: i32, z: i32, radius: i32) -> Result<(), EditError> {
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                if dx * dx + dz * dz <= radius * radius {
                    self.paint(x + dx, y, z + dz)?;
                }
            }
        }
        Ok(())
    }

    /// Filled disk on the YZ plane.
    pub fn circle_x(&mut self, x: i32, y: i32, z: i32, radius: i32) -> Result<(), EditError> {
        for dy in -radius..=radius {
            for dz in -radius..=radius {
                if dy * dy + dz * dz <= radius * radius {
                    self.paint(x, y + dy, z + dz)?;
                }
            }
        }
        Ok(())
    }

    /// Filled disk on the XY plane.
    pub fn circle_z(&mut self, x: i32, y: i32, z: i32, radius: i32) -> Result<(), EditError> {
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.paint(x + dx, y + dy, z)?;
                }
            }
        }
        Ok(())
    }

    /// Circle perimeter on the XZ plane via polar sampling.
    pub fn circle_outline_y(&mut self, x: i32, y: i32, z: i32, radius: i32) -> Result<(), EditError> {
        for (da, db) in polar_samples(radius) {
            self.paint(x + da, y, z + db)?;
        }
        Ok(())
    }

    /// Circle perimeter on the YZ plane via polar sampling.
    pub fn circle_outline_x(&mut self, x: i32, y: i32, z: i32, radius: i32) -> Result<(), EditError> {
        for (da, db) in polar_samples(radius) {
            self.paint(x, y + da, z + db)?;
        }
        Ok(())
    }

    /// Circle perimeter on the XY plane via polar sampling.
    pub fn circle_outline_z(&mut self, x: i32, y: i32, z: i32, radius: i32) -> Result<(), EditError> {
        for (da, db) in polar_samples(radius) {
            self.paint(x + da, y + db, z)?;
        }
        Ok(())
    }

    // -- round solids -------------------------------------------------------

    /// Spherical shell: paints every offset in the bounding cube with
    /// `(radius-1)² ≤ dx²+dy²+dz² ≤ radius²`.
    pub fn sphere_outline(&mut self, x: i32, y: i32, z: i32, radius: i32) -> Result<(), EditError> {
        let (lower, upper) = shell_bounds(radius);
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                for dz in -radius..=radius {
                    let d2 = dx * dx + dy * dy + dz * dz;
                    if d2 >= lower && d2 <= upper {
                        self.paint(x + dx, y + dy, z + dz)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Upper half of the spherical shell plus a base ring at `y` passing the
    /// two-dimensional analogue of the shell test.
    pub fn dome_outline(&mut self, x: i32, y: i32, z: i32, radius: i32) -> Result<(), EditError> {
        let (lower, upper) = shell_bounds(radius);
        for dx in -radius..=radius {
            for dy in 0..=radius {
                for dz in -radius..=radius {
                    let d2 = dx * dx + dy * dy + dz * dz;
                    if d2 >= lower && d2 <= upper {
                        self.paint(x + dx, y + dy, z + dz)?;
                    }
                }
            }
        }
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                let d2 = dx * dx + dz * dz;
                if d2 >= lower && d2 <= upper {
                    self.paint(x + dx, y, z + dz)?;
                }
            }
        }
        Ok(())
    }

    /// Square-base pyramid wireframe: base perimeter plus one line from each
    /// base corner to the apex at `(x, y + height, z)`.
    ///
    /// `half` is the base half-extent; the base spans
    /// `[x-half, x+half] × [z-half, z+half]`.
    pub fn pyramid_outline(&mut self, x: i32, y: i32, z: i32, half: i32, height: i32) -> Result<(), EditError> {
        let side = 2 * half + 1;
        self.rectangle_outline_y(x - half, y, z - half, side, side)?;
        for (cx, cz) in [
            (x - half, z - half),
            (x + half, z - half),
            (x - half, z + half),
            (x + half, z + half),
        ] {
            self.line(cx, y, cz, x, y + height, z)?;
        }
        Ok(())
    }

    /// Cylinder mantle: a vertical column of `height` blocks at every polar
    /// sample of the base circle, plus bottom (and, when `height > 1`, top)
    /// circle outlines.
    pub fn cylinder_outline(&mut self, x: i32, y: i32, z: i32, radius: i32, height: i32) -> Result<(), EditError> {
        for (da, db) in polar_samples(radius) {
            for dy in 0..height {
                self.paint(x + da, y + dy, z + db)?;
            }
        }
        self.circle_outline_y(x, y, z, radius)?;
        if height > 1 {
            self.circle_outline_y(x, y + height - 1, z, radius)?;
        }
        Ok(())
    }

    /// Cone mantle: one line from every polar sample of the base circle to
    /// the apex at `(x, y + height, z)`, plus the base circle outline.
    pub fn cone_outline(&mut self, x: i32, y: i32, z: i32, radius: i32, height: i32) -> Result<(), EditError> {
        for (da, db) in polar_samples(radius) {
            self.line(x + da, y, z + db, x, y + height, z)?;
        }
        self.circle_outline_y(x, y, z, radius)
    }

    // -- triangles ----------------------------------------------------------

    /// Filled triangle between three points.
    ///
    /// The triangle is projected onto the plane spanned by the two axes with
    /// the largest coordinate spread (the axis with the smallest spread is
    /// dropped), rasterized over the 2-D bounding box with a
    /// barycentric-sign inside test, and painted with the dropped coordinate
    /// taken from the first vertex.
    pub fn fill_triangle(
        &mut self,
        p1: (i32, i32, i32),
        p2: (i32, i32, i32),
        p3: (i32, i32, i32),
    ) -> Result<(), EditError> {
        let spread = |a: i32, b: i32, c: i32| a.max(b).max(c) - a.min(b).min(c);
        let sx = spread(p1.0, p2.0, p3.0);
        let sy = spread(p1.1, p2.1, p3.1);
        let sz = spread(p1.2, p2.2, p3.2);

        // Drop the flattest axis; prefer dropping Y on ties since most
        // painted triangles are roughly horizontal.
        let dropped = if sy <= sx && sy <= sz {
            Axis::Y
        } else if sx <= sz {
            Axis::X
        } else {
            Axis::Z
        };

        let a = project(p1, dropped);
        let b = project(p2, dropped);
        let c = project(p3, dropped);

        let min_u = a.0.min(b.0).min(c.0);
        let max_u = a.0.max(b.0).max(c.0);
        let min_v = a.1.min(b.1).min(c.1);
        let max_v = a.1.max(b.1).max(c.1);

        for u in min_u..=max_u {
            for v in min_v..=max_v {
                if point_in_triangle((u, v), a, b, c) {
                    let (x, y, z) = unproject((u, v), dropped, p1);
                    self.paint(x, y, z)?;
                }
            }
        }
        Ok(())
    }
}

/// Axis dropped when projecting a triangle to 2-D.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
    Z,
}

fn project(p: (i32, i32, i32), dropped: Axis) -> (i32, i32) {
    match dropped {
        Axis::X => (p.1, p.2),
        Axis::Y => (p.0, p.2),
        Axis::Z => (p.0, p.1),
    }
}

fn unproject(uv: (i32, i32), dropped: Axis, fixed_from: (i32, i32, i32)) -> (i32, i32, i32) {
    match dropped {
        Axis::X => (fixed_from.0, uv.0, uv.1),
        Axis::Y => (uv.0, fixed_from.1, uv.1),
        Axis::Z => (uv.0, uv.1, fixed_from.2),
    }
}

/// Sign-consistency point-in-triangle test; boundary points count as inside.
fn point_in_triangle(p: (i32, i32), a: (i32, i32), b: (i32, i32), c: (i32, i32)) -> bool {
    let edge = |from: (i32, i32), to: (i32, i32)| -> i64 {
        let (fx, fy) = (from.0 as i64, from.1 as i64);
        let (tx, ty) = (to.0 as i64, to.1 as i64);
        let (px, py) = (p.0 as i64, p.1 as i64);
        (tx - fx) * (py - fy) - (ty - fy) * (px - fx)
    };
    let e1 = edge(a, b);
    let e2 = edge(b, c);
    let e3 = edge(c, a);
    (e1 >= 0 && e2 >= 0 && e3 >= 0) || (e1 <= 0 && e2 <= 0 && e3 <= 0)
}

/// Shell membership bounds for a sphere of the given radius:
/// `(radius-1)² ≤ d² ≤ radius²`.
fn shell_bounds(radius: i32) -> (i32, i32) {
    (radius * radius - 2 * radius + 1, radius * radius)
}

/// Polar perimeter samples for a circle of the given radius, as offsets on
/// the two free axes. `steps = max(12, round(2π·radius))`.
fn polar_samples(radius: i32) -> impl Iterator<Item = (i32, i32)> {
    let steps = ((TAU * radius as f64).round() as i32).max(12);
    let r = radius as f64;
    (0..steps).map(move |i| {
        let theta = TAU * i as f64 / steps as f64;
        (
            (r * theta.cos()).round() as i32,
            (r * theta.sin()).round() as i32,
        )
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use hexworld_block::Block;
    use crate::sink::EditSink;
    use crate::strategy::StrategyRegistry;

    /// Sink that records every committed block with its routing metadata.
    #[derive(Default)]
    struct CaptureSink {
        commits: Vec<(WorldId, String, String, Block, i64)>,
    }

    impl EditSink for CaptureSink {
        fn commit_block(
            &mut self,
            world: WorldId,
            layer_data_id: &str,
            model: &str,
            block: Block,
            group_id: i64,
        ) -> Result<(), EditError> {
            self.commits.push((
                world,
                layer_data_id.to_string(),
                model.to_string(),
                block,
                group_id,
            ));
            Ok(())
        }
    }

    impl CaptureSink {
        fn positions(&self) -> Vec<(i32, i32, i32)> {
            self.commits
                .iter()
                .map(|(_, _, _, block, _)| block.position())
                .collect()
        }

        fn distinct(&self) -> HashSet<(i32, i32, i32)> {
            self.positions().into_iter().collect()
        }
    }

    #[derive(Default)]
    struct HighlightLog {
        marks: Vec<(i32, i32, i32, u32)>,
    }

    impl SelectionFeedback for HighlightLog {
        fn highlight(&mut self, x: i32, y: i32, z: i32, color: u32) {
            self.marks.push((x, y, z, color));
        }
    }

    fn session(strategy_name: &str) -> PaintSession {
        PaintSession::new(
            hexworld_block::BlockDef::parse("stone").unwrap(),
            WorldId(1),
            "ld-terrain",
            "brush",
            7,
            StrategyRegistry::new().create(strategy_name).unwrap(),
        )
    }

    #[test]
    fn test_paint_forwards_session_metadata() {
        let session = session("default");
        let mut sink = CaptureSink::default();
        Painter::new(&session, &mut sink).paint(1, 2, 3).unwrap();

        let (world, layer, model, block, group) = &sink.commits[0];
        assert_eq!(*world, WorldId(1));
        assert_eq!(layer, "ld-terrain");
        assert_eq!(model, "brush");
        assert_eq!(block.position(), (1, 2, 3));
        assert_eq!(block.type_id, "stone");
        assert_eq!(*group, 7);
    }

    #[test]
    fn test_cube_paints_full_extent() {
        let session = session("default");
        let mut sink = CaptureSink::default();
        Painter::new(&session, &mut sink)
            .cube(0, 0, 0, 3, 2, 4)
            .unwrap();

        assert_eq!(sink.commits.len(), 24);
        let distinct = sink.distinct();
        assert_eq!(distinct.len(), 24);
        for (x, y, z) in distinct {
            assert!((0..3).contains(&x));
            assert!((0..2).contains(&y));
            assert!((0..4).contains(&z));
        }
    }

    #[test]
    fn test_raster_strategy_keeps_even_parity_half() {
        let session = session("raster");
        let mut sink = CaptureSink::default();
        Painter::new(&session, &mut sink)
            .cube(0, 0, 0, 2, 2, 2)
            .unwrap();

        let distinct = sink.distinct();
        assert_eq!(distinct.len(), 4);
        for (x, y, z) in distinct {
            assert_eq!((x + y + z) % 2, 0);
        }
    }

    #[test]
    fn test_cube_outline_has_hollow_interior() {
        let session = session("default");
        let mut sink = CaptureSink::default();
        Painter::new(&session, &mut sink)
            .cube_outline(0, 0, 0, 3, 3, 3)
            .unwrap();

        let distinct = sink.distinct();
        assert!(!distinct.contains(&(1, 1, 1)));
        // 27 cells minus the single interior one.
        assert_eq!(distinct.len(), 26);
        // No coordinate painted twice.
        assert_eq!(sink.commits.len(), 26);
    }

    #[test]
    fn test_axis_aligned_line() {
        let session = session("default");
        let mut sink = CaptureSink::default();
        Painter::new(&session, &mut sink).line(0, 0, 0, 3, 0, 0).unwrap();
        assert_eq!(
            sink.positions(),
            vec![(0, 0, 0), (1, 0, 0), (2, 0, 0), (3, 0, 0)]
        );
    }

    #[test]
    fn test_degenerate_line_paints_one_point() {
        let session = session("default");
        let mut sink = CaptureSink::default();
        Painter::new(&session, &mut sink).line(5, 5, 5, 5, 5, 5).unwrap();
        assert_eq!(sink.positions(), vec![(5, 5, 5)]);
    }

    #[test]
    fn test_diagonal_line_steps_dominant_axis() {
        let session = session("default");
        let mut sink = CaptureSink::default();
        Painter::new(&session, &mut sink).line(0, 0, 0, 4, 2, 0).unwrap();
        // steps = 4 -> 5 samples, endpoints exact.
        assert_eq!(sink.commits.len(), 5);
        assert_eq!(sink.positions()[0], (0, 0, 0));
        assert_eq!(sink.positions()[4], (4, 2, 0));
    }

    #[test]
    fn test_rectangle_outline_corners_once() {
        let session = session("default");
        let mut sink = CaptureSink::default();
        Painter::new(&session, &mut sink)
            .rectangle_outline_y(0, 0, 0, 4, 3)
            .unwrap();

        // Perimeter of a 4x3 rectangle = 2*4 + 2*3 - 4.
        assert_eq!(sink.commits.len(), 10);
        assert_eq!(sink.distinct().len(), 10);
        for corner in [(0, 0, 0), (3, 0, 0), (0, 0, 2), (3, 0, 2)] {
            assert!(sink.distinct().contains(&corner));
        }
        assert!(!sink.distinct().contains(&(1, 0, 1)));
    }

    #[test]
    fn test_circle_y_membership() {
        let session = session("default");
        let mut sink = CaptureSink::default();
        Painter::new(&session, &mut sink).circle_y(0, 0, 0, 2).unwrap();

        let distinct = sink.distinct();
        assert!(distinct.contains(&(2, 0, 0)));
        assert!(distinct.contains(&(0, 0, -2)));
        assert!(!distinct.contains(&(3, 0, 0)));
        assert!(!distinct.contains(&(2, 0, 2)));
        for (x, y, z) in distinct {
            assert_eq!(y, 0);
            assert!(x * x + z * z <= 4);
        }
    }

    #[test]
    fn test_circle_outline_hits_cardinal_points() {
        let session = session("default");
        let mut sink = CaptureSink::default();
        Painter::new(&session, &mut sink)
            .circle_outline_y(0, 0, 0, 3)
            .unwrap();

        let distinct = sink.distinct();
        for point in [(3, 0, 0), (-3, 0, 0), (0, 0, 3), (0, 0, -3)] {
            assert!(distinct.contains(&point), "missing {point:?}");
        }
        // Every sample lies near the radius.
        for (x, _, z) in distinct {
            let d = ((x * x + z * z) as f64).sqrt();
            assert!((d - 3.0).abs() < 1.0);
        }
    }

    #[test]
    fn test_sphere_outline_shell_bounds() {
        let session = session("default");
        let mut sink = CaptureSink::default();
        Painter::new(&session, &mut sink)
            .sphere_outline(0, 0, 0, 3)
            .unwrap();

        let distinct = sink.distinct();
        assert!(!distinct.contains(&(0, 0, 0)));
        assert!(distinct.contains(&(3, 0, 0)));
        assert!(distinct.contains(&(0, -3, 0)));
        assert!(distinct.contains(&(2, 0, 0)));
        assert!(!distinct.contains(&(1, 0, 0)));
        for (x, y, z) in distinct {
            let d2 = x * x + y * y + z * z;
            assert!((4..=9).contains(&d2), "({x},{y},{z}) d2={d2}");
        }
    }

    #[test]
    fn test_dome_outline_stays_above_base() {
        let session = session("default");
        let mut sink = CaptureSink::default();
        Painter::new(&session, &mut sink)
            .dome_outline(0, 5, 0, 3)
            .unwrap();

        let distinct = sink.distinct();
        assert!(distinct.contains(&(0, 8, 0)));
        assert!(distinct.contains(&(3, 5, 0)));
        assert!(distinct.iter().all(|&(_, y, _)| y >= 5));
        assert!(!distinct.contains(&(0, 2, 0)));
    }

    #[test]
    fn test_pyramid_outline_base_and_apex() {
        let session = session("default");
        let mut sink = CaptureSink::default();
        Painter::new(&session, &mut sink)
            .pyramid_outline(0, 0, 0, 2, 4)
            .unwrap();

        let distinct = sink.distinct();
        assert!(distinct.contains(&(0, 4, 0)), "apex painted");
        for corner in [(-2, 0, -2), (2, 0, -2), (-2, 0, 2), (2, 0, 2)] {
            assert!(distinct.contains(&corner), "base corner {corner:?}");
        }
        assert!(!distinct.contains(&(0, 0, 0)), "base interior hollow");
    }

    #[test]
    fn test_cylinder_outline_mantle_columns() {
        let session = session("default");
        let mut sink = CaptureSink::default();
        Painter::new(&session, &mut sink)
            .cylinder_outline(0, 0, 0, 3, 4)
            .unwrap();

        let distinct = sink.distinct();
        // Cardinal mantle columns run the full height.
        for dy in 0..4 {
            assert!(distinct.contains(&(3, dy, 0)));
            assert!(distinct.contains(&(-3, dy, 0)));
        }
        assert!(!distinct.contains(&(0, 1, 0)), "interior hollow");
        assert!(distinct.iter().all(|&(_, y, _)| (0..4).contains(&y)));
    }

    #[test]
    fn test_cone_outline_converges_to_apex() {
        let session = session("default");
        let mut sink = CaptureSink::default();
        Painter::new(&session, &mut sink)
            .cone_outline(0, 0, 0, 3, 5)
            .unwrap();

        let distinct = sink.distinct();
        assert!(distinct.contains(&(0, 5, 0)), "apex painted");
        assert!(distinct.contains(&(3, 0, 0)), "base rim painted");
        assert!(distinct.iter().all(|&(_, y, _)| (0..=5).contains(&y)));
    }

    #[test]
    fn test_fill_triangle_horizontal() {
        let session = session("default");
        let mut sink = CaptureSink::default();
        Painter::new(&session, &mut sink)
            .fill_triangle((0, 2, 0), (6, 2, 0), (0, 2, 6))
            .unwrap();

        let distinct = sink.distinct();
        for vertex in [(0, 2, 0), (6, 2, 0), (0, 2, 6)] {
            assert!(distinct.contains(&vertex), "vertex {vertex:?}");
        }
        assert!(distinct.contains(&(2, 2, 2)), "interior filled");
        assert!(!distinct.contains(&(5, 2, 5)), "outside hypotenuse");
        // Fixed coordinate comes from the first vertex.
        assert!(distinct.iter().all(|&(_, y, _)| y == 2));
    }

    #[test]
    fn test_fill_triangle_vertical_projection() {
        let session = session("default");
        let mut sink = CaptureSink::default();
        // A wall triangle: spread is largest in X and Y, so Z is dropped.
        Painter::new(&session, &mut sink)
            .fill_triangle((0, 0, 1), (4, 0, 1), (0, 4, 1))
            .unwrap();

        let distinct = sink.distinct();
        assert!(distinct.iter().all(|&(_, _, z)| z == 1));
        assert!(distinct.contains(&(1, 1, 1)));
        assert!(!distinct.contains(&(4, 4, 1)));
    }

    #[test]
    fn test_selection_feedback_receives_committed_only() {
        let session = session("raster").with_highlight_color(0x11_22_33_44);
        let mut sink = CaptureSink::default();
        let mut log = HighlightLog::default();
        Painter::new(&session, &mut sink)
            .with_feedback(&mut log)
            .cube(0, 0, 0, 2, 1, 1)
            .unwrap();

        // (0,0,0) commits, (1,0,0) is filtered by the raster strategy.
        assert_eq!(log.marks, vec![(0, 0, 0, 0x11_22_33_44)]);
        assert_eq!(sink.commits.len(), 1);
    }
}
