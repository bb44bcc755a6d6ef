#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    use crate::{
        perf::{RunOutcome, alloc::AllocStats},
        report::{
            RunRecord, StrategyMetrics, TimeStats, format_bytes, format_duration_ns, load_time_stats,
            render_markdown, render_outcomes, write_json, write_markdown,
        },
        strategy::StrategyKind,
    };

    fn metrics(kind: StrategyKind, scale: usize, mean_ns: f64) -> StrategyMetrics {
        StrategyMetrics::new(
            kind,
            scale,
            TimeStats {
                mean_ns,
                median_ns: mean_ns,
                std_dev_ns: 1.0,
            },
            AllocStats {
                allocated_bytes: 2048,
                allocations: 3,
                peak_bytes: 512,
            },
        )
    }

    #[test]
    fn formats_units() {
        assert_eq!(format_duration_ns(12.5), "12.50 ns");
        assert_eq!(format_duration_ns(1_500.0), "1.500 μs");
        assert_eq!(format_duration_ns(2_000_000.0), "2.000 ms");
        assert_eq!(format_bytes(100), "100 B");
        assert_eq!(format_bytes(2048), "2.00 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn markdown_groups_by_scale_with_ratio() {
        let rows = vec![
            metrics(StrategyKind::ForLoopLookup, 100, 400.0),
            metrics(StrategyKind::ForLoopLookup, 10, 100.0),
            metrics(StrategyKind::DictOnTheFly, 10, 50.0),
            metrics(StrategyKind::DictOnTheFly, 100, 100.0),
        ];
        let table = render_markdown(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("| Scale | Strategy"));
        assert!(lines[2].starts_with("| 10 | for_loop_lookup | O(N²) |"));
        assert!(lines[2].contains("| 1.00 |"));
        assert!(lines[3].starts_with("| 10 | dict_on_the_fly | O(N) |"));
        assert!(lines[3].contains("| 0.50 |"));
        assert!(lines[4].starts_with("| 100 | for_loop_lookup"));
        assert!(lines[5].contains("| 0.25 |"));
        assert!(lines[5].contains("2.00 KB"));
    }

    #[test]
    fn outcomes_table_lists_each_run() {
        let outcomes = vec![RunOutcome {
            strategy: StrategyKind::ManualIteration,
            scale: 3,
            rows: 3,
            elapsed: Duration::from_nanos(250),
        }];
        let table = render_outcomes(&outcomes);
        assert!(table.contains("| manual_iteration | O(N) | 3 | 3 | 250.00 ns |"));
    }

    #[test]
    fn loads_criterion_estimates() {
        let dir = tempdir().unwrap();
        let case_dir = dir.path().join("join").join("join").join("10").join("new");
        fs::create_dir_all(&case_dir).unwrap();
        fs::write(
            case_dir.join("estimates.json"),
            r#"{
                "mean": {"point_estimate": 120.5, "standard_error": 1.0},
                "median": {"point_estimate": 118.0, "standard_error": 1.0},
                "std_dev": {"point_estimate": 4.25, "standard_error": 0.1}
            }"#,
        )
        .unwrap();
        let stats = load_time_stats(dir.path(), "join/join/10").unwrap();
        assert_eq!(stats.mean_ns, 120.5);
        assert_eq!(stats.median_ns, 118.0);
        assert_eq!(stats.std_dev_ns, 4.25);

        let err = load_time_stats(dir.path(), "join/join/99").unwrap_err();
        assert!(err.to_string().contains("estimates.json"));
    }

    #[test]
    fn writes_report_artifacts() {
        let dir = tempdir().unwrap();
        let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let record = RunRecord::new(timestamp, vec![metrics(StrategyKind::Join, 1, 10.0)]);
        assert_eq!(record.generated_at, "2024-05-01T12:00:00Z");

        let json_path = dir.path().join("latest.json");
        write_json(&json_path, &record).unwrap();
        let parsed: RunRecord = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed.metrics, record.metrics);

        let md_path = dir.path().join("report.md");
        write_markdown(&md_path, &record).unwrap();
        let doc = fs::read_to_string(&md_path).unwrap();
        assert!(doc.starts_with("# Join strategy benchmark"));
        assert!(doc.contains("| 1 | join | O(N) |"));
    }
}
