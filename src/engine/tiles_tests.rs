#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::engine::graphics::texture::TexturePattern;
    use crate::engine::scene::Scene;
    use crate::engine::tiles::{TILE_EXTENT, TexturePolicy, TileCoord, TileStreamer};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn starts_on_center_tile_with_nothing_generated() {
        let streamer = TileStreamer::new();

        assert_eq!(streamer.current_tile(), TileCoord { x: 0, z: 0 });
        assert_eq!(streamer.generated_count(), 0);
    }

    #[test]
    fn staying_inside_the_band_generates_nothing() {
        let mut streamer = TileStreamer::new();
        let mut scene = Scene::new();
        let mut rng = rng();

        for x in [-9.9, -5.0, 0.0, 5.0, 9.9] {
            assert_eq!(
                streamer.step(x, &mut scene, &TexturePolicy::default(), &mut rng),
                0
            );
        }
        assert_eq!(streamer.current_tile(), TileCoord { x: 0, z: 0 });
        assert!(scene.is_empty());
    }

    #[test]
    fn crossing_right_generates_the_three_by_three_neighborhood() {
        let mut streamer = TileStreamer::new();
        let mut scene = Scene::new();
        let mut rng = rng();

        let emitted = streamer.step(15.0, &mut scene, &TexturePolicy::default(), &mut rng);

        assert_eq!(streamer.current_tile(), TileCoord { x: 1, z: 0 });
        assert_eq!(emitted, 9);
        assert_eq!(scene.len(), 9);
        for x in 0..=2 {
            for z in -1..=1 {
                assert!(streamer.is_generated(TileCoord { x, z }));
            }
        }
    }

    #[test]
    fn revisiting_a_neighborhood_emits_no_duplicates() {
        let mut streamer = TileStreamer::new();
        let mut scene = Scene::new();
        let mut rng = rng();
        let policy = TexturePolicy::default();

        // Out to tile 1, then tile 2: the second crossing only adds the new
        // column at x = 3.
        assert_eq!(streamer.step(15.0, &mut scene, &policy, &mut rng), 9);
        assert_eq!(streamer.step(35.0, &mut scene, &policy, &mut rng), 3);
        assert_eq!(scene.len(), 12);

        // Walk back: everything around tile 1 already exists.
        assert_eq!(streamer.step(15.0, &mut scene, &policy, &mut rng), 0);
        assert_eq!(streamer.current_tile(), TileCoord { x: 1, z: 0 });
        assert_eq!(scene.len(), 12);
    }

    #[test]
    fn steps_at_most_one_tile_per_call() {
        let mut streamer = TileStreamer::new();
        let mut scene = Scene::new();
        let mut rng = rng();
        let policy = TexturePolicy::default();

        // A teleport far to the right converges one tile per call.
        let target = 200.0;
        let mut previous = streamer.current_tile().x;
        for _ in 0..32 {
            streamer.step(target, &mut scene, &policy, &mut rng);
            let current = streamer.current_tile().x;
            assert!(current - previous <= 1);
            previous = current;
        }
        assert_eq!(streamer.current_tile(), TileCoord { x: 10, z: 0 });
    }

    #[test]
    fn camera_stays_inside_the_band_under_bounded_motion() {
        let mut streamer = TileStreamer::new();
        let mut scene = Scene::new();
        let mut rng = rng();
        let policy = TexturePolicy::default();
        let half = TILE_EXTENT / 2.0;

        let mut walk = StdRng::seed_from_u64(99);
        let mut x = 0.0f32;
        for _ in 0..500 {
            x += rand::Rng::random_range(&mut walk, -5.0f32..5.0);
            streamer.step(x, &mut scene, &policy, &mut rng);

            let center = streamer.current_tile().x as f32 * TILE_EXTENT;
            assert!(x >= center - half && x <= center + half, "x={x} center={center}");
        }
    }

    #[test]
    fn negative_crossings_draw_from_the_negative_x_range() {
        let mut streamer = TileStreamer::new();
        let mut scene = Scene::new();
        let mut rng = rng();

        // Default negative range is a single variant (6 -> Grid).
        streamer.step(-15.0, &mut scene, &TexturePolicy::default(), &mut rng);

        assert_eq!(scene.len(), 9);
        for (_, model) in scene.models() {
            assert_eq!(model.texture, TexturePattern::Grid);
        }
    }

    #[test]
    fn positive_crossings_draw_from_the_positive_x_range() {
        let mut streamer = TileStreamer::new();
        let mut scene = Scene::new();
        let mut rng = rng();

        streamer.step(15.0, &mut scene, &TexturePolicy::default(), &mut rng);

        let allowed = [
            TexturePattern::Bricks,
            TexturePattern::Checker,
            TexturePattern::Panels,
            TexturePattern::SolidWhite,
            TexturePattern::Gradient,
            TexturePattern::Grid,
        ];
        for (_, model) in scene.models() {
            assert!(allowed.contains(&model.texture));
        }
    }
}
