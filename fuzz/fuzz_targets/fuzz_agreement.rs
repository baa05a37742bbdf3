#![no_main]

use covergrid_core::{
    CountSettings, CoverageRequest, Point, Strategy, check_agreement, count_with_settings,
};
use libfuzzer_sys::fuzz_target;

const MAX_MARKERS: usize = 8;

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    // Small grids keep the enumerator cheap; markers may fall off the edge.
    let width = i64::from(data[0] % 24) + 1;
    let height = i64::from(data[1] % 24) + 1;
    let threshold = i64::from(data[2] % 20);
    let markers: Vec<Point> = data[3..]
        .chunks_exact(2)
        .take(MAX_MARKERS)
        .map(|c| Point::new(i64::from(c[0] % 30) - 3, i64::from(c[1] % 30) - 3))
        .collect();

    let request = CoverageRequest::new(width, height, threshold, markers);
    let settings = CountSettings {
        unbounded_enumeration: true,
        ..Default::default()
    };

    let Ok(agreement) = check_agreement(&request, &settings) else {
        return;
    };
    assert!(agreement.agrees, "{request:?} -> {agreement:?}");

    let hybrid = count_with_settings(&request, &settings).map(|r| r.cells);
    let exact = count_with_settings(
        &request,
        &CountSettings {
            strategy: Strategy::Enumerate,
            ..settings
        },
    )
    .map(|r| r.cells);
    assert_eq!(hybrid, exact);
    assert_eq!(hybrid, Ok(agreement.enumerated));
    assert!(agreement.enumerated <= (width * height) as u64);
});
