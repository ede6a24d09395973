//! Extraction throughput for listing detail and index pages

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use url::Url;
use vacancy_scraper::infrastructure::{
    ContextualParser, DetailParseContext, ListingDetailParser, ListingIndexParser, ParseContext,
};

fn detail_page(description_paragraphs: usize) -> String {
    let description = "<p>We use Python, FastAPI, PostgreSQL and Docker on AWS with a bit of React.</p>"
        .repeat(description_paragraphs);
    format!(
        r#"<html><body>
        <h1>Senior Python Developer</h1>
        <a class="job-details--title">Acme</a>
        <span class="public-salary-item">$5000</span>
        <div class="job-post-description">{description}</div>
        <ul class="job-additional-info--body">
          <li class="job-additional-info--item"><span class="bi bi-building"></span>
            <div class="job-additional-info--item-text">Тільки віддалено</div></li>
          <li class="job-additional-info--item"><span class="bi bi-pencil-square"></span>
            <div class="job-additional-info--item-text">Є тестове завдання</div></li>
          <li><div>Англійська: Upper-Intermediate</div></li>
          <li><div>Домен: Fintech</div></li>
          <li><div>3 роки досвіду</div></li>
        </ul>
        <p class="text-muted">Вакансія опублікована 12 травня 2023 <span>·</span> 27 відгуків</p>
        </body></html>"#
    )
}

fn index_page(listings: usize) -> String {
    let links: String = (0..listings)
        .map(|i| format!(r#"<li><a class="job-list-item__link" href="/jobs/{i}-python/">Job {i}</a></li>"#))
        .collect();
    format!(
        r#"<html><body><ul>{links}</ul>
        <ul class="pagination"><li><a href="?page=2">»</a></li></ul></body></html>"#
    )
}

fn detail_extraction(c: &mut Criterion) {
    let parser = ListingDetailParser::new().unwrap();
    let context = DetailParseContext::new(Url::parse("https://djinni.co/jobs/1-python/").unwrap());

    let mut group = c.benchmark_group("detail_extraction");
    for paragraphs in [1, 20, 200] {
        let body = detail_page(paragraphs);
        group.bench_function(format!("{paragraphs}_paragraphs"), |b| {
            b.iter(|| parser.parse_body(black_box(&body), &context).unwrap());
        });
    }
    group.finish();
}

fn link_discovery(c: &mut Criterion) {
    let parser = ListingIndexParser::new().unwrap();
    let context = ParseContext::new(1, Url::parse("https://djinni.co/jobs/?primary_keyword=Python").unwrap());
    let body = index_page(15);

    c.bench_function("link_discovery_15_listings", |b| {
        b.iter(|| parser.parse_body(black_box(&body), &context).unwrap());
    });
}

criterion_group!(benches, detail_extraction, link_discovery);
criterion_main!(benches);
