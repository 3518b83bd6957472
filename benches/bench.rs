// Criterion benchmarks for Waste Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use waste_match::core::{distance::haversine_distance, Matcher, PairScorer};
use waste_match::models::{Consumer, HazardClass, Location, PricingModel, QualityGrade, Stream};

const ITEM_TYPES: [&str; 4] = ["steel_scrap", "aluminum_shavings", "spent_solvent", "plastic_film"];

fn create_stream(item_type: &str) -> Stream {
    Stream {
        item_type: item_type.to_string(),
        category: waste_match::models::classify::category_for(item_type).to_string(),
        quantity_min_tons: 10.0,
        quantity_max_tons: 20.0,
        quality_grade: QualityGrade::GradeB,
        contamination_pct: 5.0,
        hazard_class: waste_match::models::classify::hazard_for(item_type, 5.0),
        confidence: None,
    }
}

fn create_consumer(id: usize, lat: f64, lng: f64) -> Consumer {
    let item_type = ITEM_TYPES[id % ITEM_TYPES.len()];
    Consumer {
        consumer_id: format!("B{:05}", id),
        name: format!("Consumer {}", id),
        consumer_type: "Recycler".to_string(),
        accepted_item_types: [item_type.to_string()].into_iter().collect(),
        accepted_categories: ["metal".to_string()].into_iter().collect(),
        min_quality_grade: if id % 3 == 0 { QualityGrade::GradeA } else { QualityGrade::GradeC },
        min_monthly_volume_tons: (id % 40) as f64,
        max_monthly_volume_tons: Some(100.0),
        location: Location::new(lat, lng),
        pricing_model: PricingModel::parse("₹10000-12000/ton"),
        certifications: if id % 2 == 0 {
            ["CPCB".to_string()].into_iter().collect()
        } else {
            Default::default()
        },
        city: None,
        state: None,
    }
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(19.0760),
                black_box(72.8777),
                black_box(18.5204),
                black_box(73.8567),
            )
        });
    });
}

fn bench_pair_scoring(c: &mut Criterion) {
    let scorer = PairScorer::default();
    let stream = create_stream("steel_scrap");
    let consumer = create_consumer(0, 19.2, 72.9);
    let facility = Location::new(19.0, 72.8);

    c.bench_function("pair_scoring", |b| {
        b.iter(|| scorer.evaluate(black_box(&stream), black_box(&consumer), black_box(&facility)));
    });
}

fn bench_matching(c: &mut Criterion) {
    let facility = Location::new(19.0, 72.8);
    let streams: Vec<Stream> = ITEM_TYPES.iter().map(|t| create_stream(t)).collect();

    let mut group = c.benchmark_group("matching");

    for consumer_count in [10, 100, 1000, 5000].iter() {
        let consumers: Vec<Consumer> = (0..*consumer_count)
            .map(|i| {
                let lat_offset = (i as f64 * 0.013) % 10.0;
                let lng_offset = (i as f64 * 0.007) % 8.0;
                create_consumer(i, 12.0 + lat_offset, 70.0 + lng_offset)
            })
            .collect();

        for (label, matcher) in [
            ("parallel", Matcher::with_default_weights()),
            ("sequential", Matcher::with_default_weights().sequential()),
        ] {
            group.bench_with_input(
                BenchmarkId::new(label, consumer_count),
                consumer_count,
                |b, _| {
                    b.iter(|| {
                        matcher.find_matches(
                            black_box(&streams),
                            black_box(&consumers),
                            black_box(&facility),
                            black_box(20),
                        )
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_haversine_distance, bench_pair_scoring, bench_matching);

criterion_main!(benches);
