mod common;

use std::sync::Arc;

use approx::assert_relative_eq;
use hifitime::Duration;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use gridmt::prelude::*;
use gridmt::process::{FilterSpec, PickSpec, WeightScheme, WeightSpec, WindowScheme, WindowSpec};

use common::{origin, origin_time, raw_bundle, station, temp_file, FixedPicksModel};

fn body_wave_processor(weight_file: &str) -> SignalProcessor {
    let weights = temp_file(weight_file, "AK.SAW. 100.0 1.0 1.0 0.0 0.0 0.0\n");
    SignalProcessor::builder()
        .filter(FilterSpec::BandpassFreq {
            freq_min: 0.1,
            freq_max: 0.333,
        })
        .pick(PickSpec::EarthModel(Arc::new(FixedPicksModel {
            p: 10.0,
            s: 18.0,
        })))
        .window(WindowSpec::new(WindowScheme::CapBodyWave, 15.0).with_padding(2.0))
        .weight(WeightSpec::new(WeightScheme::CapBodyWave, weights))
        .build()
        .unwrap()
}

#[test]
fn test_body_wave_pipeline_end_to_end() {
    let mut processor = body_wave_processor("bw_pipeline.dat");
    let raw = raw_bundle(200);

    let processed = processor.process(&raw, None, None).unwrap();

    // the input is untouched
    assert_eq!(raw.traces.len(), 3);
    assert!(raw.has_tag(Tag::UnitsCm));

    // tags record the unit and quantity conversions
    assert!(processed.has_tag(Tag::UnitsM));
    assert!(processed.has_tag(Tag::TypeDisplacement));
    assert!(!processed.has_tag(Tag::UnitsCm));
    assert!(!processed.has_tag(Tag::TypeVelocity));

    // the transverse component has zero weight and is dropped
    assert_eq!(processed.traces.len(), 2);
    let components: Vec<char> = processed
        .iter()
        .map(|tr| tr.component().unwrap())
        .collect();
    assert_eq!(components, vec!['Z', 'R']);

    // window opens 0.4 * 15 s before the 10 s P pick, so 4 s after the origin
    for trace in &processed.traces {
        assert_relative_eq!(
            (trace.start_time - origin_time()).to_seconds(),
            4.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(trace.span(), 15.0, epsilon = 1e-9);
        assert_eq!(trace.weight, Some(1.0));
    }

    // the pick/window caches are populated under the station identifier
    let picks = processor.cached_picks("AK.SAW.").unwrap();
    assert_eq!(picks.p, 10.0);
    assert_eq!(picks.s, 18.0);
    let window = processor.cached_window("AK.SAW.").unwrap();
    assert_relative_eq!(window.length(), 15.0, epsilon = 1e-9);
}

#[test]
fn test_greens_reuse_data_windows_with_padding() {
    let mut processor = body_wave_processor("bw_greens.dat");
    let data = Dataset::new(vec![raw_bundle(200)]);
    let processed_data = data.map(&mut processor).unwrap();
    assert_eq!(processed_data.len(), 1);

    let mut greens_bundle = Bundle::new(
        "AK.SAW.",
        ["ZSS", "RSS", "TSS"]
            .iter()
            .map(|channel| {
                gridmt::Trace::new(channel, origin_time(), 0.5, vec![1.0; 200])
            })
            .collect(),
    )
    .with_station(Arc::new(station()))
    .with_origin(Arc::new(origin()));
    greens_bundle.add_tag(Tag::TypeDisplacement);

    let greens = GreensLibrary::new(vec![greens_bundle]);
    let processed = greens.map(&mut processor).unwrap();
    let bundle = processed.iter().next().unwrap();
    assert!(bundle.has_tag(Tag::TypeGreens));

    // greens are cut with the data window padded by 2 s on each end
    for trace in &bundle.traces {
        assert_relative_eq!(
            (trace.start_time - origin_time()).to_seconds(),
            2.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(trace.span(), 19.0, epsilon = 1e-9);
    }

    // greens keep every component and get no weight attribute
    assert_eq!(bundle.traces.len(), 3);
    assert!(bundle.iter().all(|tr| tr.weight.is_none()));
}

#[test]
fn test_surface_weight_scheme_selects_components() {
    let weights = temp_file("sw_select.dat", "AK.SAW. 100.0 0.0 0.0 1.0 0.0 2.0\n");
    let mut processor = SignalProcessor::builder()
        .weight(WeightSpec::new(WeightScheme::CapSurfaceWave, weights))
        .build()
        .unwrap();

    let mut bundle = raw_bundle(50);
    bundle.add_tag(Tag::UnitsM);
    bundle.add_tag(Tag::TypeDisplacement);
    let processed = processor.process(&bundle, None, None).unwrap();

    let kept: Vec<(char, f64)> = processed
        .iter()
        .map(|tr| (tr.component().unwrap(), tr.weight.unwrap()))
        .collect();
    assert_eq!(kept, vec![('Z', 1.0), ('T', 2.0)]);
}

#[test]
fn test_station_absent_from_weight_table_is_dropped() {
    let weights = temp_file("sw_absent.dat", "II.KDAK.00 400.0 1.0 1.0 1.0 1.0 1.0\n");
    let mut processor = SignalProcessor::builder()
        .weight(WeightSpec::new(WeightScheme::CapSurfaceWave, weights))
        .build()
        .unwrap();

    let mut bundle = raw_bundle(50);
    bundle.add_tag(Tag::UnitsM);
    bundle.add_tag(Tag::TypeDisplacement);
    let processed = processor.process(&bundle, None, None).unwrap();
    assert!(processed.is_empty());
}

#[test]
fn test_distance_scaling_applies_to_amplitudes() {
    // flat scaling: (distance / reference) ^ 0 * 3 = 3
    let weights = temp_file("scaling.dat", "AK.SAW. 100.0 1.0 1.0 1.0 1.0 1.0\n");
    let mut spec = WeightSpec::new(WeightScheme::CapBodyWave, weights);
    spec.scaling_power = Some(0.0);
    spec.adhoc_factor = Some(3.0);
    let mut processor = SignalProcessor::builder().weight(spec).build().unwrap();

    let mut bundle = Bundle::new(
        "AK.SAW.",
        vec![gridmt::Trace::new(
            "BHZ",
            origin_time(),
            0.5,
            vec![4.0; 101],
        )],
    )
    .with_station(Arc::new(station()))
    .with_origin(Arc::new(origin()));
    bundle.add_tag(Tag::UnitsM);
    bundle.add_tag(Tag::TypeDisplacement);

    let processed = processor.process(&bundle, None, None).unwrap();
    // middle sample is outside the edge taper
    assert_relative_eq!(processed.traces[0].data[50], 12.0, epsilon = 1e-9);
}

#[test]
fn test_unit_conversion_and_integration_without_filter() {
    let mut processor = SignalProcessor::builder().build().unwrap();

    let mut bundle = Bundle::new(
        "AK.SAW.",
        vec![gridmt::Trace::new(
            "BHZ",
            origin_time(),
            0.5,
            vec![1.0; 11],
        )],
    )
    .with_station(Arc::new(station()))
    .with_origin(Arc::new(origin()));
    bundle.add_tag(Tag::UnitsCm);
    bundle.add_tag(Tag::TypeVelocity);

    let processed = processor.process(&bundle, None, None).unwrap();
    assert!(processed.has_tag(Tag::UnitsM));
    assert!(processed.has_tag(Tag::TypeDisplacement));

    // cumulative sum of 0.01 m/s sampled at 0.5 s: sample k holds 0.005 * (k + 1)
    assert_relative_eq!(processed.traces[0].data[5], 0.03, epsilon = 1e-12);
    // no weight configuration: every surviving trace gets unit weight
    assert_eq!(processed.traces[0].weight, Some(1.0));
}

#[test]
fn test_pipeline_is_stable_on_noise() {
    let mut processor = body_wave_processor("bw_noise.dat");

    let mut rng = StdRng::seed_from_u64(7);
    let normal = Normal::new(0.0, 1.0).unwrap();
    let traces = ["BHZ", "BHR", "BHT"]
        .iter()
        .map(|channel| {
            let data: Vec<f64> = (0..400).map(|_| normal.sample(&mut rng)).collect();
            gridmt::Trace::new(channel, origin_time(), 0.5, data)
        })
        .collect();
    let mut bundle = Bundle::new("AK.SAW.", traces)
        .with_station(Arc::new(station()))
        .with_origin(Arc::new(origin()));
    bundle.add_tag(Tag::UnitsCm);
    bundle.add_tag(Tag::TypeVelocity);

    let processed = processor.process(&bundle, None, None).unwrap();
    for trace in &processed.traces {
        assert!(trace.data.iter().all(|x| x.is_finite()));
        // centimeter-scale noise stays centimeter-scale after filtering and scaling
        let peak = trace.data.iter().fold(0.0_f64, |m, x| m.max(x.abs()));
        assert!(peak < 1.0);
    }
}

#[test]
fn test_pick_file_strategy_and_window() {
    let picks = temp_file(
        "picks.dat",
        "# station  P  S\nAK.SAW. 12.0 21.0\nII.KDAK.00 30.0 52.0\n",
    );
    let mut processor = SignalProcessor::builder()
        .pick(PickSpec::PickFile { path: picks })
        .window(WindowSpec::new(WindowScheme::CapSurfaceWave, 30.0))
        .build()
        .unwrap();

    let processed = processor.process(&raw_bundle(200), None, None).unwrap();

    // surface window opens 0.3 * 30 s before the 21 s S pick
    let window = processor.cached_window("AK.SAW.").unwrap();
    assert_relative_eq!(
        (window.start - origin_time()).to_seconds(),
        12.0,
        epsilon = 1e-9
    );
    assert_relative_eq!(window.length(), 30.0, epsilon = 1e-9);
    for trace in &processed.traces {
        assert_relative_eq!(trace.span(), 30.0, epsilon = 1e-9);
    }

    // the whole file lands in the cache
    assert_eq!(processor.cached_picks("II.KDAK.00").unwrap().p, 30.0);
}

#[test]
fn test_window_outside_trace_fails() {
    let mut processor = SignalProcessor::builder()
        .pick(PickSpec::EarthModel(Arc::new(FixedPicksModel {
            p: 10.0,
            s: 18.0,
        })))
        .window(WindowSpec::new(WindowScheme::CapBodyWave, 500.0))
        .build()
        .unwrap();

    let result = processor.process(&raw_bundle(200), None, None);
    assert!(matches!(result, Err(GridmtError::CutOutsideTrace { .. })));
}

#[test]
fn test_missing_metadata_is_rejected() {
    let mut processor = SignalProcessor::builder().build().unwrap();

    let mut no_station = Bundle::new(
        "AK.SAW.",
        vec![gridmt::Trace::new("BHZ", origin_time(), 0.5, vec![0.0; 10])],
    )
    .with_origin(Arc::new(origin()));
    no_station.add_tag(Tag::UnitsM);
    assert!(matches!(
        processor.process(&no_station, None, None),
        Err(GridmtError::MissingStationMetadata(_))
    ));

    // explicit metadata arguments make up for absent back-references
    assert!(processor
        .process(&no_station, Some(&station()), None)
        .is_ok());

    let untagged = Bundle::new(
        "AK.SAW.",
        vec![gridmt::Trace::new("BHZ", origin_time(), 0.5, vec![0.0; 10])],
    )
    .with_station(Arc::new(station()))
    .with_origin(Arc::new(origin()));
    assert!(matches!(
        processor.process(&untagged, None, None),
        Err(GridmtError::MissingTags(_))
    ));
}

#[test]
fn test_explicit_origin_shifts_window() {
    let mut processor = SignalProcessor::builder()
        .pick(PickSpec::EarthModel(Arc::new(FixedPicksModel {
            p: 10.0,
            s: 18.0,
        })))
        .window(WindowSpec::new(WindowScheme::CapBodyWave, 15.0))
        .build()
        .unwrap();

    let shifted = Origin::new(
        origin_time() + Duration::from_seconds(10.0),
        61.454,
        -149.742,
        33_033.6,
    );
    let processed = processor
        .process(&raw_bundle(200), None, Some(&shifted))
        .unwrap();

    // window is anchored to the supplied origin time, not the bundle's back-reference
    for trace in &processed.traces {
        assert_relative_eq!(
            (trace.start_time - origin_time()).to_seconds(),
            14.0,
            epsilon = 1e-9
        );
    }
}
