use summary_plot::api::{
    HISTORY_LEGEND_GROUP, OBSERVATION_LEGEND_GROUP, PlotBuilderConfig, PlotClickEvent,
    QuerySnapshot, SummaryQueryPlan, ViewSettings, active_timestamp_from_click,
    assemble_summary_view,
};
use summary_plot::core::{
    EnsembleIdent, Frequency, QueryResult, StatisticFunction, StatisticValueObject,
    SummaryVectorDateObservation, SummaryVectorObservations, VectorHistoricalData,
    VectorRealizationData, VectorSpecification, VectorStatisticData, VisualizationMode,
};
use summary_plot::error::PlotError;
use summary_plot::render::Figure;

const DAY_MS: i64 = 86_400_000;

fn specifications() -> Vec<VectorSpecification> {
    let iter0 = EnsembleIdent::regular("case", "iter-0");
    let iter1 = EnsembleIdent::regular("case", "iter-1");
    vec![
        VectorSpecification::new(iter0.clone(), "FOPT", "#1f77b4").with_historical_vector(true),
        VectorSpecification::new(iter1, "FOPT", "#ff7f0e").with_historical_vector(true),
        VectorSpecification::new(iter0, "FOPR", "#1f77b4"),
    ]
}

fn realizations(count: u32) -> Vec<VectorRealizationData> {
    (0..count)
        .map(|realization| {
            VectorRealizationData::new(
                realization,
                vec![0, DAY_MS, 2 * DAY_MS],
                vec![0.0, 1.0, 2.0 + f64::from(realization)],
                "SM3",
                false,
            )
            .expect("valid realization")
        })
        .collect()
}

fn statistics() -> VectorStatisticData {
    VectorStatisticData {
        realizations: vec![0, 1],
        timestamps_utc_ms: vec![0, DAY_MS],
        value_objects: vec![StatisticValueObject {
            statistic_function: StatisticFunction::Mean,
            values: vec![0.5, 1.5],
        }],
        unit: "SM3".to_owned(),
        is_rate: false,
    }
}

#[test]
fn query_plan_only_covers_needed_categories() {
    let settings = ViewSettings::new(specifications(), VisualizationMode::StatisticalLines)
        .with_config(PlotBuilderConfig::default().with_resample_frequency(Some(Frequency::Yearly)))
        .with_overlays(true, true);
    let plan = SummaryQueryPlan::for_settings(&settings);

    assert!(plan.realizations.is_empty());
    assert_eq!(plan.statistics.len(), 3);
    assert!(
        plan.statistics
            .iter()
            .all(|key| key.resample_frequency == Some(Frequency::Yearly))
    );
    assert_eq!(plan.historical.len(), 2);
    assert!(plan.historical.iter().all(|key| key.resample_frequency.is_none()));
    assert_eq!(plan.observations.len(), 2);
}

#[test]
fn partial_results_render_what_is_available() {
    let settings = ViewSettings::new(specifications(), VisualizationMode::IndividualRealizations)
        .with_active_timestamp(Some(DAY_MS));
    let snapshot = QuerySnapshot {
        realizations: vec![
            QueryResult::loaded(realizations(2)),
            QueryResult::pending(),
            QueryResult::failed(),
        ],
        ..QuerySnapshot::default()
    };

    let view = assemble_summary_view(&settings, &snapshot, None).expect("assemble view");
    assert!(view.status.is_fetching);
    assert!(view.status.is_error);
    assert_eq!(view.figure.traces.len(), 2);
    assert_eq!(view.figure.grid.num_subplots, 2);
    assert_eq!(view.figure.cursor_lines.len(), 2);
    assert_eq!(view.figure.cursor_labels[0].text, "1970-01-02");
    assert_eq!(
        view.figure.subplot_titles,
        vec![
            "Field Oil Production Total [SM3]".to_owned(),
            "Field Oil Production Rate".to_owned()
        ]
    );

    assert_eq!(view.published_channels.len(), 1);
    let values = view.published_channels[0].generate(settings.active_timestamp_utc_ms);
    assert_eq!(values.len(), 2);
    assert!((values[1].value - 1.0).abs() <= 1e-12);
}

#[test]
fn mismatched_snapshot_is_rejected() {
    let settings = ViewSettings::new(specifications(), VisualizationMode::StatisticalLines);
    let snapshot = QuerySnapshot {
        statistics: vec![QueryResult::loaded(statistics())],
        ..QuerySnapshot::default()
    };
    let err = assemble_summary_view(&settings, &snapshot, None).expect_err("length mismatch");
    assert!(matches!(
        err,
        PlotError::LengthMismatch {
            specifications: 3,
            results: 1
        }
    ));
}

#[test]
fn full_view_combines_statistics_history_and_observations() {
    let specifications = specifications();
    let settings = ViewSettings::new(
        specifications.clone(),
        VisualizationMode::StatisticsAndRealizations,
    )
    .with_overlays(true, true);
    let history = VectorHistoricalData {
        timestamps_utc_ms: vec![0, DAY_MS],
        values: vec![0.0, 1.2],
        unit: "SM3".to_owned(),
        is_rate: false,
    };
    let observations = vec![SummaryVectorObservations {
        vector_name: "FOPT".to_owned(),
        observations: vec![SummaryVectorDateObservation {
            timestamp_utc_ms: DAY_MS,
            value: 1.1,
            error: 0.1,
            label: "FOPT_OBS".to_owned(),
        }],
    }];
    let snapshot = QuerySnapshot {
        realizations: specifications
            .iter()
            .map(|_| QueryResult::loaded(realizations(2)))
            .collect(),
        statistics: specifications
            .iter()
            .map(|_| QueryResult::loaded(statistics()))
            .collect(),
        historical: vec![
            QueryResult::loaded(history.clone()),
            QueryResult::loaded(history),
        ],
        observations: vec![
            QueryResult::loaded(observations),
            QueryResult::loaded(Vec::new()),
        ],
    };

    let view = assemble_summary_view(&settings, &snapshot, None).expect("assemble view");
    assert_eq!(view.status, Default::default());

    // 6 realization lines, 3 mean lines, 1 history line, 1 observation marker.
    let figure = &view.figure;
    assert_eq!(figure.traces.len(), 11);
    let groups: Vec<&str> = figure
        .legend
        .iter()
        .map(|entry| entry.group.as_str())
        .collect();
    assert_eq!(
        groups,
        vec![
            "case::iter-0",
            "case::iter-1",
            HISTORY_LEGEND_GROUP,
            OBSERVATION_LEGEND_GROUP
        ]
    );
    figure.validate().expect("consistent figure");
}

#[test]
fn figure_survives_json_contract() {
    let settings = ViewSettings::new(specifications(), VisualizationMode::IndividualRealizations)
        .with_active_timestamp(Some(2 * DAY_MS));
    let snapshot = QuerySnapshot {
        realizations: vec![
            QueryResult::loaded(realizations(1)),
            QueryResult::loaded(realizations(1)),
            QueryResult::loaded(realizations(1)),
        ],
        ..QuerySnapshot::default()
    };
    let view = assemble_summary_view(&settings, &snapshot, None).expect("assemble view");

    let json = view
        .figure
        .to_json_contract_v1_pretty()
        .expect("serialize figure");
    assert!(json.contains("\"schema_version\": 1"));

    let restored = Figure::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(restored.grid, view.figure.grid);
    assert_eq!(restored.subplot_titles, view.figure.subplot_titles);
    assert_eq!(restored.traces.len(), view.figure.traces.len());
    assert_eq!(restored.legend.len(), view.figure.legend.len());
    assert_eq!(restored.cursor_labels.len(), 2);

    let future = json.replace("\"schema_version\": 1", "\"schema_version\": 9");
    let err = Figure::from_json_compat_str(&future).expect_err("unknown schema version");
    assert!(matches!(err, PlotError::InvalidData(_)));
}

#[test]
fn view_settings_deserialize_with_defaults() {
    let settings: ViewSettings = serde_json::from_str(
        r##"{
            "specifications": [{
                "ensemble_ident": {"case_uuid": "case", "ensemble_name": "iter-0", "kind": "Regular"},
                "ensemble_display_name": "Iter 0",
                "vector_name": "FOPT",
                "color": "#1f77b4"
            }],
            "mode": "StatisticalFanchart"
        }"##,
    )
    .expect("parse settings");
    assert_eq!(settings.specifications.len(), 1);
    assert!(!settings.specifications[0].has_historical_vector);
    assert!(!settings.show_observations);
    assert_eq!(settings.statistics.fanchart.len(), 3);
    assert_eq!(settings.config, PlotBuilderConfig::default());
}

#[test]
fn click_moves_active_timestamp_to_known_sample() {
    let known = [0, DAY_MS, 2 * DAY_MS];
    let event = PlotClickEvent {
        x_utc_ms: 1.4 * DAY_MS as f64,
    };
    assert_eq!(active_timestamp_from_click(event, &known), Some(DAY_MS));
}

#[test]
fn malformed_statistics_only_drop_their_own_pair() {
    let settings = ViewSettings::new(specifications(), VisualizationMode::StatisticalLines);
    let mut broken = statistics();
    broken.value_objects[0].values.pop();
    let snapshot = QuerySnapshot {
        statistics: vec![
            QueryResult::loaded(statistics()),
            QueryResult::loaded(broken),
            QueryResult::loaded(statistics()),
        ],
        ..QuerySnapshot::default()
    };

    let view = assemble_summary_view(&settings, &snapshot, None).expect("assemble view");
    assert_eq!(view.figure.traces.len(), 2);
    assert_eq!(view.figure.grid.num_subplots, 2);
    view.figure.validate().expect("consistent figure");
}
