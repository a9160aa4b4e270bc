use std::hint::black_box;

use chrono::{Datelike, Duration, NaiveTime, Utc, Weekday};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use medsched::db::repositories::LocalLedger;
use medsched::db::repository::{BookingRepository, ReportingRepository};
use medsched::models::{
    AppointmentType, AvailabilityWindow, NewAppointment, PatientId, ProviderId, WeekSchedule,
};
use medsched::services::slots::{is_valid_slot, slots_in_window};

fn time(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

fn next_monday() -> chrono::NaiveDate {
    let mut date = Utc::now().date_naive() + Duration::days(1);
    while date.weekday() != Weekday::Mon {
        date += Duration::days(1);
    }
    date
}

fn booking(start: NaiveTime) -> NewAppointment {
    NewAppointment {
        provider_id: ProviderId::new(1),
        patient_id: PatientId::new(100),
        date: next_monday(),
        start,
        duration_minutes: 30,
        appointment_type: AppointmentType::Routine,
        notes: None,
    }
}

fn bench_slot_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("slot_generation");

    for span_hours in [1u32, 4, 9, 16] {
        let window = AvailabilityWindow::new(true, time(6, 0), time(6 + span_hours, 0));
        group.bench_with_input(
            BenchmarkId::new("span_hours", span_hours),
            &window,
            |b, window| {
                b.iter(|| {
                    let slots: Vec<NaiveTime> = slots_in_window(black_box(window), 30).collect();
                    black_box(slots)
                });
            },
        );
    }

    group.finish();
}

fn bench_slot_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("slot_validation");

    let window = AvailabilityWindow::new(true, time(8, 0), time(17, 0));
    group.bench_function("probe_full_day_grid", |b| {
        b.iter(|| {
            for minute in (0..1440u32).step_by(5) {
                let probe = time(minute / 60, minute % 60);
                black_box(is_valid_slot(black_box(&window), probe, 30));
            }
        });
    });

    group.finish();
}

fn bench_ledger_operations(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    let mut group = c.benchmark_group("ledger");

    let ledger = LocalLedger::new();
    ledger.set_week_schedule(ProviderId::new(1), WeekSchedule::standard_week());

    group.bench_function("reserve_cancel_cycle", |b| {
        b.iter(|| {
            rt.block_on(async {
                let appointment = ledger.reserve(booking(time(9, 0))).await.unwrap();
                ledger.cancel(appointment.id, 100.into()).await.unwrap();
            });
        });
    });

    // Half-booked day: the listing has to filter taken starts
    let busy = LocalLedger::new();
    busy.set_week_schedule(ProviderId::new(1), WeekSchedule::standard_week());
    rt.block_on(async {
        for i in 0..9u32 {
            busy.reserve(booking(time(8 + i, 0))).await.unwrap();
        }
    });

    group.bench_function("list_available_slots_half_booked", |b| {
        b.iter(|| {
            rt.block_on(async {
                let slots = busy
                    .list_available_slots(ProviderId::new(1), next_monday(), 30)
                    .await
                    .unwrap();
                black_box(slots)
            });
        });
    });

    group.bench_function("provider_day_view", |b| {
        b.iter(|| {
            rt.block_on(async {
                let sheet = busy
                    .provider_day_view(ProviderId::new(1), next_monday())
                    .await
                    .unwrap();
                black_box(sheet)
            });
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_slot_generation,
    bench_slot_validation,
    bench_ledger_operations
);
criterion_main!(benches);
