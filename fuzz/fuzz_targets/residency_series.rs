#![no_main]

use libfuzzer_sys::fuzz_target;
use schedsig::aggregate::{period, residency_sum, trace_event, Align};
use schedsig::signal::{EventSeries, Window};

fuzz_target!(|data: &[u8]| {
    // Byte pairs: time step, event value (mod 3 mapped to -1, 0, 1)
    let mut time = 0.0;
    let series: EventSeries = data
        .chunks_exact(2)
        .map(|pair| {
            time += pair[0] as f64 / 16.0;
            (time, pair[1] as i32 % 3 - 1)
        })
        .collect();

    let stop = time / 2.0;
    let window = Window::new(0.0, stop).ok();

    // Aggregations may fail with a count mismatch but must never panic
    let _ = residency_sum(&mut series.clone(), window);
    let _ = trace_event(&mut series.clone(), window);
    let _ = period(&mut series.clone(), Align::End, window);
    let _ = residency_sum(&mut series.clone(), None);
});
