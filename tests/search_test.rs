//! End-to-end tests for the FAQ search engine

use faq_engine::config::SearchConfig;
use faq_engine::models::FaqRecord;
use faq_engine::search::SearchEngine;
use faq_engine::storage::{FaqStore, InMemoryFaqStore, SledFaqStore};
use std::sync::Arc;
use tempfile::TempDir;

fn hr_corpus() -> Vec<FaqRecord> {
    vec![
        FaqRecord::new(
            1,
            "Как оформить отпуск?",
            "Подайте заявление за две недели.",
            "отпуск,оформление",
            "Кадры",
        ),
        FaqRecord::new(
            2,
            "Когда выплачивается зарплата?",
            "Аванс 20-го, расчет 5-го числа.",
            "зарплата,выплаты",
            "Финансы",
        ),
        FaqRecord::new(
            3,
            "Как взять больничный?",
            "Откройте лист нетрудоспособности в поликлинике.",
            "больничный,болезнь",
            "Кадры",
        ),
        FaqRecord::new(
            4,
            "Как заказать справку 2-НДФЛ?",
            "Запросите справку в личном кабинете.",
            "справка,ндфл",
            "Документы",
        ),
    ]
}

async fn engine_over(records: Vec<FaqRecord>) -> SearchEngine {
    let store = Arc::new(InMemoryFaqStore::with_records(records));
    SearchEngine::new(SearchConfig::default(), store).await
}

#[tokio::test]
async fn exact_question_always_matches_its_record() {
    let corpus = hr_corpus();
    let engine = engine_over(corpus.clone()).await;

    for record in &corpus {
        let matched = engine
            .search(&record.question, 1)
            .await
            .unwrap_or_else(|| panic!("no match for {}", record.question));
        assert_eq!(matched.faq_id, record.id);
        assert_eq!(matched.score, 10.0);
    }
}

#[tokio::test]
async fn keyword_queries_find_their_records() {
    let engine = engine_over(hr_corpus()).await;

    let matched = engine.search("больничный", 1).await.unwrap();
    assert_eq!(matched.faq_id, 3);

    let matched = engine.search("зарплата", 1).await.unwrap();
    assert_eq!(matched.faq_id, 2);
}

#[tokio::test]
async fn typo_corrected_query_finds_record() {
    let engine = engine_over(hr_corpus()).await;

    // "зп" corrects to "зарплата", which is both a keyword and contained
    // in the normalized question via the corrected expansion
    let matched = engine.search("зп", 1).await.unwrap();
    assert_eq!(matched.faq_id, 2);
}

#[tokio::test]
async fn sled_backed_engine_end_to_end() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(SledFaqStore::new(dir.path()).unwrap());
    store.upsert_all(&hr_corpus()).unwrap();

    let engine = SearchEngine::new(SearchConfig::default(), Arc::clone(&store) as Arc<dyn FaqStore>).await;
    assert_eq!(engine.record_count(), 4);

    let matched = engine.search("отпуск", 5).await.unwrap();
    assert_eq!(matched.faq_id, 1);

    // Administrative edit: add a record, refresh, and find it
    store
        .upsert(&FaqRecord::new(
            5,
            "Как оформить командировку?",
            "Согласуйте поездку с руководителем.",
            "командировка",
            "Кадры",
        ))
        .unwrap();
    engine.refresh().await;

    assert_eq!(engine.record_count(), 5);
    let matched = engine.search("командировка", 5).await.unwrap();
    assert_eq!(matched.faq_id, 5);
}

#[tokio::test]
async fn empty_store_is_degraded_until_refresh() {
    let store = Arc::new(InMemoryFaqStore::new());
    let engine =
        SearchEngine::new(SearchConfig::default(), Arc::clone(&store) as Arc<dyn FaqStore>).await;

    assert_eq!(engine.record_count(), 0);
    assert!(engine.search("отпуск", 1).await.is_none());

    for record in hr_corpus() {
        store.insert(record);
    }
    engine.refresh().await;

    assert_eq!(engine.record_count(), 4);
    assert!(engine.search("отпуск", 1).await.is_some());
}

#[tokio::test]
async fn engine_cache_eviction_causes_rescoring() {
    let store = Arc::new(InMemoryFaqStore::with_records(hr_corpus()));
    let config = SearchConfig {
        cache_capacity: 2,
        ..Default::default()
    };
    let engine = SearchEngine::new(config, store).await;

    // Fill the cache past capacity; the first entry is evicted
    engine.search("отпуск", 1).await.unwrap();
    engine.search("зарплата", 1).await.unwrap();
    engine.search("больничный", 1).await.unwrap();

    let scored = engine.stats().scorer_calls;
    engine.search("отпуск", 1).await.unwrap();
    assert!(engine.stats().scorer_calls > scored, "evicted query must be re-scored");

    // The most recent entry is still cached
    let scored = engine.stats().scorer_calls;
    engine.search("больничный", 1).await.unwrap();
    assert_eq!(engine.stats().scorer_calls, scored);
}

#[tokio::test]
async fn concurrent_refresh_never_exposes_torn_state() {
    // Answers encode their record id so a match assembled from a mixed
    // snapshot would be detectable
    let corpus: Vec<FaqRecord> = (1..=20)
        .map(|id| {
            FaqRecord::new(
                id,
                &format!("Вопрос номер {id}?"),
                &format!("ответ-{id}"),
                &format!("тема{id}"),
                "Кадры",
            )
        })
        .collect();

    let store = Arc::new(InMemoryFaqStore::with_records(corpus.clone()));
    let engine = Arc::new(SearchEngine::new(SearchConfig::default(), store).await);

    let mut tasks = Vec::new();

    for worker in 0..4usize {
        let engine = Arc::clone(&engine);
        let corpus = corpus.clone();
        tasks.push(tokio::spawn(async move {
            for i in 0..200 {
                let record = &corpus[(worker * 7 + i) % corpus.len()];
                if let Some(matched) = engine.search(&record.question, worker as i64 + 1).await {
                    assert_eq!(matched.answer, format!("ответ-{}", matched.faq_id));
                    assert!(
                        engine.record(matched.faq_id).is_some(),
                        "match referenced an id absent from the corpus"
                    );
                }
            }
        }));
    }

    {
        let engine = Arc::clone(&engine);
        tasks.push(tokio::spawn(async move {
            for _ in 0..50 {
                engine.refresh().await;
                tokio::task::yield_now().await;
            }
        }));
    }

    for task in tasks {
        task.await.unwrap();
    }
}

#[tokio::test]
async fn context_carries_a_conversation() {
    let records = vec![
        FaqRecord::new(1, "Отпуск", "Общие правила отпуска.", "отпуск", "Кадры"),
        FaqRecord::new(
            2,
            "Как оформить отпуск?",
            "Подайте заявление.",
            "отпуск,оформление",
            "Кадры",
        ),
    ];
    let config = SearchConfig {
        score_threshold: 8.5,
        ..Default::default()
    };
    let store = Arc::new(InMemoryFaqStore::with_records(records));
    let engine = SearchEngine::new(config, store).await;

    let user = 42;
    assert!(engine.search("отпуск", user).await.is_some());

    // Alone this is below threshold; with the previous query prefixed it passes
    let assisted = engine.search("как оформить", user).await.unwrap();
    assert_eq!(assisted.faq_id, 2);
    assert_eq!(engine.stats().context_assisted, 1);

    // A user without history gets nothing for the same words
    assert!(engine.search("как оформить", 0).await.is_none());
}
