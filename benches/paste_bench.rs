use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use office_paste::{ClipboardPayload, Dispatcher, PasteData, PasteOptions, parse_html};

const SMALL_ITEMS: usize = 32;
const LARGE_ITEMS: usize = 4_000;

const STYLESHEET: &str = concat!(
    "@list l0:level1 { mso-level-number-format:alpha-lower; } ",
    "@list l0:level2 { mso-level-number-format:bullet; } ",
    "@list l0:level3 { mso-level-start-at:2; }"
);

/// Word list paragraphs cycling through three levels, with a table every 50 items.
fn make_word_list(items: usize) -> String {
    let mut body = String::with_capacity(items * 160);
    for i in 0..items {
        let level = i % 3 + 1;
        body.push_str(&format!(
            r#"<p class=MsoListParagraph style="margin-left:{}px;mso-list:l0 level{level} lfo1"><span style="mso-list:Ignore">·</span>Item {i}</p>"#,
            level * 48
        ));
        if i % 50 == 49 {
            body.push_str(
                r#"<table style="border:none"><tr><td style="width:225.4pt;padding:0cm 5.4pt 0cm 5.4pt">cell</td></tr></table>"#,
            );
        }
    }
    format!(
        r#"<html xmlns:o="urn:schemas-microsoft-com:office:office"><head><style>{STYLESHEET}</style></head><body>{body}</body></html>"#
    )
}

fn bench_parse_large(c: &mut Criterion) {
    let input = make_word_list(LARGE_ITEMS);
    c.bench_function("bench_parse_large", |b| {
        b.iter(|| {
            let parsed = parse_html(black_box(&input));
            black_box(parsed.fragment);
        });
    });
}

fn bench_dispatch(c: &mut Criterion, name: &str, items: usize) {
    let input = make_word_list(items);
    let dispatcher = Dispatcher::with_default_normalizers(PasteOptions::default());
    c.bench_function(name, |b| {
        b.iter_batched(
            || PasteData::new(ClipboardPayload::from_html(input.as_str())),
            |mut data| {
                dispatcher.process(&mut data);
                black_box(data.to_html().len());
            },
            BatchSize::LargeInput,
        );
    });
}

fn bench_dispatch_small(c: &mut Criterion) {
    bench_dispatch(c, "bench_dispatch_small", SMALL_ITEMS);
}

fn bench_dispatch_large(c: &mut Criterion) {
    bench_dispatch(c, "bench_dispatch_large", LARGE_ITEMS);
}

criterion_group!(
    benches,
    bench_parse_large,
    bench_dispatch_small,
    bench_dispatch_large
);
criterion_main!(benches);
