// Benchmark for day resolution
// Measures resolve() over plain and recurring calendars of growing size

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use day_agenda::models::calendar::{CalendarComponent, CalendarModel};
use day_agenda::models::event::{Event, EventTime};
use day_agenda::services::day_filter::DayFilter;

fn calendar(size: usize, recurring: bool) -> CalendarModel {
    let first = NaiveDate::from_ymd_opt(2021, 1, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();

    (0..size)
        .map(|i| {
            let start = first + Duration::hours(i as i64 * 7);
            let mut builder = Event::builder()
                .summary(format!("Meeting {}", i))
                .start(EventTime::Floating(start))
                .end(EventTime::Floating(start + Duration::minutes(45)));
            if recurring {
                builder = builder.sequence(0).rrule("FREQ=WEEKLY;COUNT=52");
            }
            CalendarComponent::Event(builder.build().unwrap())
        })
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let filter = DayFilter::default();

    for size in [10, 100, 1000] {
        let plain = calendar(size, false);
        group.bench_with_input(BenchmarkId::new("single", size), &plain, |b, model| {
            b.iter(|| filter.resolve(black_box(model), black_box("2021-03-15")))
        });

        let recurring = calendar(size, true);
        group.bench_with_input(BenchmarkId::new("recurring", size), &recurring, |b, model| {
            b.iter(|| filter.resolve(black_box(model), black_box("2021-03-15")))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
