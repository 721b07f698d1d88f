#[cfg(test)]
mod tests {
    use crate::config::{AppConfig, LoadingConfig, ResetPolicy};
    use crate::cookbook::{Cookbook, CookbookPatch, CookbookStatus, GenerationRequest, GenerationResponse, Length};
    use crate::pipeline::CookbookGenerator;
    use crate::progress::{format_elapsed, progress_target, step_index_for, ProgressCallback, ProgressMode, ProgressSimulator, StepState};
    use crate::steps::GenerationStep;
    use crate::store::CookbookStore;
    use crate::templates::find_template;
    use crate::variant::Variant;
    use crate::{Error, Result};
    use std::time::Duration;

    fn lettered_steps() -> Vec<GenerationStep> {
        [("A", 8.0), ("B", 15.0), ("C", 60.0), ("D", 30.0), ("E", 20.0), ("F", 10.0)]
            .into_iter()
            .map(|(label, weight)| GenerationStep::new(label, "Sparkle", weight))
            .collect()
    }

    fn facts(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("fact {}", i)).collect()
    }

    #[test]
    fn test_curve_at_one_time_constant() {
        let mut sim = ProgressSimulator::default();
        sim.tick(36.0);

        assert!((sim.displayed_progress() - 63.212).abs() < 0.01);
        assert_eq!(sim.displayed_progress_rounded(), 63);
        assert_eq!(sim.mode(), ProgressMode::Simulated);
    }

    #[test]
    fn test_curve_bounds_and_clamp() {
        let mut last = -1.0;
        for i in 0..1000 {
            let elapsed = i as f64 * 0.1;
            let target = progress_target(elapsed, 90.0);
            assert!((0.0..=95.0).contains(&target));
            assert!(target > last, "not increasing at {}", elapsed);
            last = target;
        }

        assert_eq!(progress_target(0.0, 90.0), 0.0);
        assert_eq!(progress_target(200.0, 90.0), 95.0);
        assert_eq!(progress_target(1e9, 90.0), 95.0);
        assert_eq!(progress_target(1e9, 0.5), 95.0);
    }

    #[test]
    fn test_step_boundaries() {
        let steps = lettered_steps();
        assert_eq!(step_index_for(10.0, &steps), Some(1));
        assert_eq!(step_index_for(0.0, &steps), Some(0));
        assert_eq!(step_index_for(5.0, &steps), Some(0));
        assert_eq!(step_index_for(95.0, &steps), Some(5));
    }

    #[test]
    fn test_step_index_never_decreases() {
        let mut sim = ProgressSimulator::new(90.0, lettered_steps(), facts(3));
        let mut last = 0;
        for i in 0..2000 {
            sim.tick(i as f64 * 0.2);
            assert!(sim.active_step_index() >= last);
            last = sim.active_step_index();
        }
        assert_eq!(last, 5);
        assert_eq!(sim.current_step().label, "F");
    }

    #[test]
    fn test_tick_is_relative_to_start() {
        let mut sim = ProgressSimulator::default().started_at(1000.0);
        sim.tick(1036.0);
        assert_eq!(sim.displayed_progress_rounded(), 63);
        assert_eq!(sim.elapsed_seconds(), 36.0);
    }

    #[test]
    fn test_fact_rotation_is_cyclic() {
        let mut sim = ProgressSimulator::new(90.0, Vec::new(), facts(5)).with_fact_index(3);
        assert_eq!(sim.current_fact(), "fact 3");

        sim.rotate_fact();
        sim.rotate_fact();
        assert_eq!(sim.fact_index(), 0);

        for _ in 0..3 {
            sim.rotate_fact();
        }
        assert_eq!(sim.fact_index(), 3);
    }

    #[test]
    fn test_fact_rotation_ignores_mode() {
        let mut sim = ProgressSimulator::new(90.0, Vec::new(), facts(2));
        sim.set_real_progress(40.0);
        sim.rotate_fact();
        assert_eq!(sim.current_fact(), "fact 1");
    }

    #[test]
    fn test_real_progress_disengages_curve() {
        let mut sim = ProgressSimulator::default();
        sim.tick(10.0);
        sim.set_real_progress(60.0);
        assert_eq!(sim.displayed_progress_rounded(), 60);
        assert_eq!(sim.mode(), ProgressMode::Real);

        let step = sim.active_step_index();
        for i in 0..50 {
            sim.tick(10.0 + i as f64);
        }
        assert_eq!(sim.displayed_progress_rounded(), 60);
        assert_eq!(sim.active_step_index(), step);
        assert_eq!(sim.elapsed_seconds(), 10.0);
    }

    #[test]
    fn test_real_progress_can_go_anywhere() {
        let mut sim = ProgressSimulator::default();
        sim.set_real_progress(80.0);
        sim.set_real_progress(40.0);
        assert_eq!(sim.displayed_progress_rounded(), 40);
        sim.set_real_progress(100.0);
        assert_eq!(sim.displayed_progress_rounded(), 100);
        sim.set_real_progress(250.0);
        assert_eq!(sim.displayed_progress(), 100.0);
    }

    #[test]
    fn test_zero_progress_sticky_by_default() {
        let mut sim = ProgressSimulator::default();
        sim.set_real_progress(60.0);
        sim.set_real_progress(0.0);
        sim.tick(500.0);

        assert_eq!(sim.mode(), ProgressMode::Real);
        assert_eq!(sim.displayed_progress_rounded(), 60);
    }

    #[test]
    fn test_zero_progress_restarts_curve() {
        let mut sim = ProgressSimulator::default().with_reset_policy(ResetPolicy::Restart);
        sim.tick(100.0);
        assert!(sim.active_step_index() > 0);

        sim.set_real_progress(60.0);
        sim.set_real_progress(0.0);
        assert_eq!(sim.mode(), ProgressMode::Simulated);
        assert_eq!(sim.displayed_progress(), 0.0);
        assert_eq!(sim.active_step_index(), 0);

        sim.tick(200.0);
        assert_eq!(sim.elapsed_seconds(), 0.0);
        sim.tick(236.0);
        assert_eq!(sim.displayed_progress_rounded(), 63);
    }

    #[test]
    fn test_zero_progress_while_simulated_is_ignored() {
        let mut sim = ProgressSimulator::default().with_reset_policy(ResetPolicy::Restart);
        sim.tick(36.0);
        sim.set_real_progress(0.0);
        sim.set_real_progress(f64::NAN);
        assert_eq!(sim.mode(), ProgressMode::Simulated);
        assert_eq!(sim.displayed_progress_rounded(), 63);
    }

    #[test]
    fn test_degenerate_inputs_fall_back_to_defaults() {
        let sim = ProgressSimulator::new(0.0, Vec::new(), Vec::new());
        assert_eq!(sim.expected_duration(), 90.0);
        assert_eq!(sim.steps().len(), 6);
        assert_eq!(sim.facts().len(), 8);

        let bad_steps = vec![GenerationStep::new("zero", "X", 0.0), GenerationStep::new("inf", "X", f64::INFINITY)];
        let sim = ProgressSimulator::new(f64::NAN, bad_steps, facts(1));
        assert_eq!(sim.expected_duration(), 90.0);
        assert_eq!(sim.current_step().label, "Understanding your recipe request");

        let mixed = vec![GenerationStep::new("bad", "X", -1.0), GenerationStep::new("good", "X", 4.0)];
        let sim = ProgressSimulator::new(30.0, mixed, facts(1));
        assert_eq!(sim.steps().len(), 1);
        assert_eq!(sim.current_step().label, "good");
    }

    #[test]
    fn test_elapsed_formatting() {
        assert_eq!(format_elapsed(65.0), "1m 5s");
        assert_eq!(format_elapsed(45.0), "45s");
        assert_eq!(format_elapsed(45.9), "45s");
        assert_eq!(format_elapsed(0.0), "0s");
        assert_eq!(format_elapsed(125.7), "2m 5s");

        let mut sim = ProgressSimulator::default();
        assert_eq!(sim.elapsed_label(), "Starting...");
        sim.tick(65.4);
        assert_eq!(sim.formatted_elapsed(), "1m 5s");
        assert_eq!(sim.elapsed_label(), "1m 5s elapsed");
    }

    #[test]
    fn test_step_states_and_hint() {
        let mut sim = ProgressSimulator::new(90.0, lettered_steps(), facts(1));
        sim.tick(3.8); // target just above 10%
        assert_eq!(
            sim.step_states(),
            vec![
                StepState::Done,
                StepState::Active,
                StepState::Pending,
                StepState::Pending,
                StepState::Pending,
                StepState::Pending,
            ]
        );
        assert!(!sim.show_patience_hint());

        sim.tick(1000.0);
        assert_eq!(sim.displayed_progress_rounded(), 95);
        assert!(sim.show_patience_hint());
    }

    #[test]
    fn test_simulator_as_progress_callback() {
        let mut sim = ProgressSimulator::default();
        let callback: &mut dyn ProgressCallback = &mut sim;
        callback.update(0.0, "queued");
        assert!(!callback.should_cancel());
        callback.update(25.0, "writing");
        assert_eq!(sim.displayed_progress_rounded(), 25);
    }

    #[test]
    fn test_simulator_from_config() {
        let config = LoadingConfig {
            variant: Variant::Book,
            expected_duration: 45.0,
            progress: Some(30.0),
            messages: Some(facts(2)),
            ..LoadingConfig::default()
        };
        let sim = ProgressSimulator::from_config(&config, ResetPolicy::Sticky);
        assert_eq!(sim.expected_duration(), 45.0);
        assert_eq!(sim.facts().len(), 2);
        assert_eq!(sim.mode(), ProgressMode::Real);
        assert_eq!(sim.displayed_progress_rounded(), 30);

        let sim = ProgressSimulator::from_config(&LoadingConfig::default(), ResetPolicy::Sticky);
        assert_eq!(sim.facts().len(), 8);
        assert_eq!(sim.mode(), ProgressMode::Simulated);
    }

    #[test]
    fn test_app_config_parse() {
        let config = AppConfig::from_toml_str(
            r#"
            endpoint = "http://localhost:8080"
            reset_policy = "restart"

            [loading]
            variant = "magic"
            expected_duration = 45.0
            current_operation = "Drafting soups"
            messages = ["Stir often.", "Taste as you go."]
            "#,
        )
        .unwrap();

        assert_eq!(config.endpoint, "http://localhost:8080");
        assert_eq!(config.reset_policy, ResetPolicy::Restart);
        assert_eq!(config.loading.variant, Variant::Magic);
        assert_eq!(config.loading.expected_duration, 45.0);
        assert_eq!(config.loading.current_operation.as_deref(), Some("Drafting soups"));
        assert_eq!(config.store_path.to_str(), Some("cookbook-storage.json"));
    }

    #[test]
    fn test_app_config_defaults_and_validation() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.loading.expected_duration, 90.0);

        let err = AppConfig::from_toml_str("[loading]\nexpected_duration = -5.0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = AppConfig::from_toml_str("[loading]\nprogress = 120.0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = AppConfig::from_toml_str("[loading]\nvariant = \"sparkly\"\n").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_app_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    fn sample_cookbook(id: &str) -> Cookbook {
        let request = find_template("comfort-food-classics")
            .unwrap()
            .to_request(Default::default(), Length::Standard);
        Cookbook::draft(id, &request, 1_700_000_000)
    }

    #[test]
    fn test_store_list_operations() {
        let mut store = CookbookStore::new();
        store.add_cookbook(sample_cookbook("a"));
        store.add_cookbook(sample_cookbook("b"));
        assert_eq!(store.cookbooks[0].id, "b");

        store
            .update_cookbook("a", &CookbookPatch::status(CookbookStatus::Complete), 1_700_000_100)
            .unwrap();
        let a = store.get("a").unwrap();
        assert_eq!(a.status, CookbookStatus::Complete);
        assert_eq!(a.updated_at, 1_700_000_100);

        let err = store.update_cookbook("zzz", &CookbookPatch::default(), 0).unwrap_err();
        assert!(matches!(err, Error::CookbookNotFound(_)));

        assert!(store.remove_cookbook("b"));
        assert!(!store.remove_cookbook("b"));
        assert_eq!(store.cookbooks.len(), 1);
    }

    #[test]
    fn test_store_generation_state() {
        let mut store = CookbookStore::new();
        store.set_progress(42.0);
        store.set_generating(true, "Writing");
        assert!(store.is_generating);
        assert_eq!(store.generation_progress, 0.0);

        store.set_progress(77.0);
        store.set_generating(false, "");
        assert!(!store.is_generating);
        assert_eq!(store.generation_progress, 77.0);

        store.update_current(&CookbookPatch::status(CookbookStatus::Error));
        assert!(store.current.is_none());

        store.set_current(Some(sample_cookbook("draft")));
        store.update_current(&CookbookPatch {
            title: Some("Soup Season".into()),
            ..CookbookPatch::default()
        });
        assert_eq!(store.current.as_ref().unwrap().title, "Soup Season");

        store.reset();
        assert!(store.current.is_none());
        assert_eq!(store.generation_progress, 0.0);
    }

    #[test]
    fn test_store_persists_only_cookbooks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookbooks.json");

        let mut store = CookbookStore::new();
        store.add_cookbook(sample_cookbook("kept"));
        store.set_current(Some(sample_cookbook("draft")));
        store.set_generating(true, "Writing");
        store.save(&path).unwrap();

        let loaded = CookbookStore::load(&path).unwrap();
        assert_eq!(loaded.cookbooks, store.cookbooks);
        assert!(loaded.current.is_none());
        assert!(!loaded.is_generating);
        assert!(!loaded.is_loading);

        let empty = CookbookStore::load(&dir.path().join("nothing.json")).unwrap();
        assert!(empty.cookbooks.is_empty());
    }

    #[test]
    fn test_cookbook_wire_names() {
        let json = serde_json::to_value(sample_cookbook("x")).unwrap();
        assert_eq!(json["type"], "recipe-collection");
        assert_eq!(json["status"], "draft");
        assert!(json.get("userId").is_some());
    }

    #[test]
    fn test_apply_response() {
        let mut cookbook = sample_cookbook("x");
        cookbook.apply_response(
            &GenerationResponse {
                success: true,
                content: "<h1>Soups</h1>".into(),
                raw_content: "Soups".into(),
                word_count: 1,
                item_count: Some(4),
                error: None,
            },
            1_700_000_500,
        );
        assert_eq!(cookbook.status, CookbookStatus::Complete);
        assert_eq!(cookbook.item_count, Some(4));
        assert_eq!(cookbook.generated_at, Some(1_700_000_500));

        let mut failed = sample_cookbook("y");
        failed.apply_response(
            &GenerationResponse {
                success: false,
                content: String::new(),
                raw_content: String::new(),
                word_count: 0,
                item_count: None,
                error: Some("quota".into()),
            },
            1,
        );
        assert_eq!(failed.status, CookbookStatus::Error);
        assert!(failed.generated_at.is_none());
    }

    struct ScriptedGenerator {
        reports: Vec<f64>,
    }

    impl CookbookGenerator for ScriptedGenerator {
        fn generate(&self, request: &GenerationRequest, progress: &mut dyn ProgressCallback) -> Result<GenerationResponse> {
            for p in &self.reports {
                if progress.should_cancel() {
                    return Err(Error::GenerationFailed("cancelled".into()));
                }
                progress.update(*p, "working");
            }
            Ok(GenerationResponse {
                success: true,
                content: format!("<h1>{}</h1>", request.title),
                raw_content: request.title.clone(),
                word_count: 3,
                item_count: None,
                error: None,
            })
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    #[test]
    fn test_generator_drives_simulator() {
        let generator = ScriptedGenerator {
            reports: vec![0.0, 35.0, 80.0],
        };
        let request = find_template("weeknight-dinners")
            .unwrap()
            .to_request(Default::default(), Length::Detailed);
        assert_eq!(generator.estimated_time(&request), Duration::from_secs(150));

        let mut sim = ProgressSimulator::new(
            generator.estimated_time(&request).as_secs_f64(),
            Vec::new(),
            Vec::new(),
        );
        let response = generator.generate(&request, &mut sim).unwrap();

        assert!(response.success);
        assert_eq!(sim.mode(), ProgressMode::Real);
        assert_eq!(sim.displayed_progress_rounded(), 80);
        assert_eq!(generator.name(), "scripted");
    }
}
