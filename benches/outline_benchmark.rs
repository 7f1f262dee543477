//! Benchmarks for outline extraction, segmentation and ranking.
//!
//! Run with: cargo bench
//!
//! Documents are synthetic: each page carries a numbered heading followed by
//! a few paragraphs of body text.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use docsift::model::{Block, Document, Line, Page, Span};
use docsift::{
    extract_outline, segment_documents, HashEmbedder, OutlineOptions, PdfProvider, Query,
    RankOptions,
};

/// Creates a minimal synthetic PDF with the given number of pages.
fn create_test_pdf(page_count: usize) -> Vec<u8> {
    let mut content = String::new();
    content.push_str("%PDF-1.4\n");
    content.push_str("1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", i * 2 + 4)).collect();
    content.push_str(&format!(
        "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} /Resources << /Font << /F1 3 0 R >> >> >>\nendobj\n",
        kids.join(" "),
        page_count
    ));
    content.push_str("3 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n");

    let mut next_obj = 4;
    for i in 0..page_count {
        let page_obj = next_obj;
        let content_obj = next_obj + 1;
        next_obj += 2;

        content.push_str(&format!(
            "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents {} 0 R >>\nendobj\n",
            page_obj, content_obj
        ));

        let text = format!(
            "BT /F1 18 Tf 72 720 Td ({}. Chapter) Tj ET BT /F1 11 Tf 72 690 Td 14 TL \
             (Body text of the chapter for benchmarking.) Tj T* (More body text follows here.) Tj ET",
            i + 1
        );
        content.push_str(&format!(
            "{} 0 obj\n<< /Length {} >>\nstream\n{}\nendstream\nendobj\n",
            content_obj,
            text.len(),
            text
        ));
    }

    let xref_offset = content.len();
    content.push_str(&format!("xref\n0 {}\n", next_obj));
    content.push_str("0000000000 65535 f \n");
    for _ in 1..next_obj {
        content.push_str("0000000000 00000 n \n");
    }
    content.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        next_obj, xref_offset
    ));

    content.into_bytes()
}

fn line(text: &str, size: f32, font: &str) -> Line {
    Line::from_spans(vec![Span::new(text, size, font)])
}

/// Creates a synthetic page-described document.
fn create_document(name: &str, page_count: usize) -> Document {
    let mut doc = Document::new(name);
    for p in 0..page_count {
        let mut page = Page::letter(p as u32);
        page.add_block(Block::text(vec![line(
            &format!("{}. Chapter {}", p + 1, p + 1),
            18.0,
            "Helvetica-Bold",
        )]));
        for s in 0..3 {
            page.add_block(Block::text(vec![line(
                &format!("{}.{} Topic", p + 1, s + 1),
                14.0,
                "Helvetica-Bold",
            )]));
            page.add_block(Block::text(
                (0..4)
                    .map(|l| {
                        line(
                            &format!("Body line {} about travel, food and planning a trip.", l),
                            11.0,
                            "Helvetica",
                        )
                    })
                    .collect(),
            ));
        }
        doc.add_page(page);
    }
    doc
}

/// Benchmark PDF loading at various sizes.
fn bench_pdf_loading(c: &mut Criterion) {
    let mut group = c.benchmark_group("pdf_loading");
    let provider = PdfProvider::new();

    for page_count in [1, 5, 10].iter() {
        let data = create_test_pdf(*page_count);
        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| {
                // synthetic xref offsets may need recovery, ignore failures
                let _ = provider.load_bytes("bench.pdf", black_box(&data));
            });
        });
    }

    group.finish();
}

/// Benchmark outline extraction with both heading policies.
fn bench_outline(c: &mut Criterion) {
    let doc = create_document("bench.pdf", 20);
    let strict = OutlineOptions::new();
    let relaxed = OutlineOptions::new().relaxed();

    c.bench_function("outline_strict_20_pages", |b| {
        b.iter(|| extract_outline(black_box(&doc), &strict));
    });
    c.bench_function("outline_relaxed_20_pages", |b| {
        b.iter(|| extract_outline(black_box(&doc), &relaxed));
    });
}

/// Benchmark segmentation and ranking of a small collection.
fn bench_ranking(c: &mut Criterion) {
    let docs: Vec<Document> = (0..5)
        .map(|i| create_document(&format!("guide_{}.pdf", i), 4))
        .collect();
    let embedder = HashEmbedder::default();
    let query = Query::from_persona("Travel Planner", "Plan a trip of 4 days");
    let query_embedding = query.embed(&embedder).unwrap();
    let options = RankOptions::default();

    c.bench_function("segment_5_documents", |b| {
        b.iter(|| segment_documents(black_box(&docs)));
    });
    c.bench_function("rank_5_documents", |b| {
        b.iter(|| {
            let sections = segment_documents(&docs);
            docsift::rank::rank_sections(
                sections,
                &query_embedding,
                "plan a trip",
                &embedder,
                &options,
            )
            .unwrap()
        });
    });
}

criterion_group!(benches, bench_pdf_loading, bench_outline, bench_ranking);
criterion_main!(benches);
