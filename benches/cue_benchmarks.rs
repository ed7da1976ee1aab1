//! Benchmarks for parsing, lookup, and ranking.
//!
//! Run with: cargo bench
//! Run with all features: cargo bench --all-features

use std::fmt::Write;

use criterion::{BenchmarkId, Criterion};
use subcue::{
    CueUpdate, Language, MarkupMode, ParseOptions, RealLanguage, SrtParser, SubtitleDocument,
    SubtitleFile, SubtitleInfo, SubtitleSelector, SubtitleTrack, find_active_cue,
};

#[cfg(feature = "async")]
use subcue::SubtitleLoader;
#[cfg(feature = "async")]
use tokio::runtime::Runtime;

#[cfg(feature = "async")]
const SAMPLE_SRT: &str = "tests/fixtures/sample.srt";

/// A feature-length SRT body with `count` cues, two lines each.
fn generate_srt(count: u64) -> String {
    let mut text = String::new();
    for index in 0..count {
        let start = index * 2_500;
        let end = start + 2_000;
        let _ = writeln!(
            text,
            "{}\n{} --> {}\n<i>Line {index} of the cue</i>\nsecond <b>line</b>\n",
            index + 1,
            timestamp(start),
            timestamp(end)
        );
    }
    text
}

fn timestamp(millis: u64) -> String {
    format!(
        "{:02}:{:02}:{:02},{:03}",
        millis / 3_600_000,
        (millis % 3_600_000) / 60_000,
        (millis % 60_000) / 1000,
        millis % 1000
    )
}

fn benchmark_parsing(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("parse");

    for count in [100_u64, 1_500] {
        let text = generate_srt(count);
        group.bench_with_input(BenchmarkId::new("simple", count), &text, |bencher, text| {
            bencher.iter(|| SrtParser::new().parse(text).unwrap());
        });

        let nested = SrtParser::with_options(ParseOptions::new().with_markup(MarkupMode::Nested));
        group.bench_with_input(BenchmarkId::new("nested", count), &text, |bencher, text| {
            bencher.iter(|| nested.parse(text).unwrap());
        });
    }

    group.finish();
}

fn benchmark_lookup(criterion: &mut Criterion) {
    let document = SubtitleDocument::parse(&generate_srt(1_500)).unwrap();
    let last_cue_time = 1_499 * 2_500 + 1_000;

    criterion.bench_function("find active cue (last of 1500)", |bencher| {
        bencher.iter(|| find_active_cue(&document, last_cue_time, 0.0));
    });

    criterion.bench_function("track playback (one hour at 250 ms ticks)", |bencher| {
        bencher.iter(|| {
            let mut track = SubtitleTrack::new();
            track.set_document(document.clone());
            let mut shown = 0;
            for tick in 0..14_400_u64 {
                if matches!(track.on_time_changed(tick * 250), CueUpdate::Show(_)) {
                    shown += 1;
                }
            }
            shown
        });
    });
}

fn benchmark_ranking(criterion: &mut Criterion) {
    let candidates: Vec<SubtitleInfo> = RealLanguage::ALL
        .into_iter()
        .map(|language| {
            let mut info = SubtitleInfo::new(Some("tt0111161"), Language::Real(language));
            for index in 0..20_u32 {
                info.add_file(SubtitleFile::new(
                    format!("{}-{index}.srt", language.code()),
                    format!("https://subs.example.com/{}/{index}", language.code()),
                    (index % 7) as f32,
                    index * 13 % 101,
                ));
            }
            info
        })
        .chain(std::iter::once(SubtitleInfo::NONE))
        .collect();
    let selector = SubtitleSelector::new().with_preferred_language(RealLanguage::English);

    criterion.bench_function("rank and select candidates", |bencher| {
        bencher.iter(|| {
            let ranked = selector.candidates_for(&candidates, "tt0111161");
            selector.select_default(&ranked)
        });
    });
}

#[cfg(feature = "async")]
fn benchmark_async_loading(criterion: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = criterion.benchmark_group("async");
    group.sample_size(30);

    group.bench_function("load sample", |bencher| {
        bencher.iter(|| {
            rt.block_on(async {
                SubtitleLoader::new()
                    .load_async(SAMPLE_SRT, None)
                    .await
                    .unwrap()
            })
        });
    });

    group.finish();
}

#[cfg(not(feature = "async"))]
fn benchmark_async_loading(_criterion: &mut Criterion) {}

criterion::criterion_group!(
    benches,
    benchmark_parsing,
    benchmark_lookup,
    benchmark_ranking,
    benchmark_async_loading,
);

criterion::criterion_main!(benches);
