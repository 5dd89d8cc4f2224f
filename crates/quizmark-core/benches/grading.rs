use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizmark_core::grading::{grade, normalize_free_text};
use quizmark_core::input::Submission;
use quizmark_core::model::{Answer, Question, QuestionKind};
use uuid::Uuid;

fn make_question(kind: QuestionKind, answer_count: usize) -> Question {
    let question_id = Uuid::new_v4();
    let answers = (0..answer_count)
        .map(|i| Answer {
            id: Uuid::new_v4(),
            text: format!("answer {i}"),
            correct: Some(i == 0),
            position: Some(i as u32 + 1),
            question_id,
        })
        .collect();
    Question {
        id: question_id,
        text: "bench question".into(),
        kind,
        answers,
        quiz_id: Uuid::new_v4(),
    }
}

fn bench_grade(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade");

    let single = make_question(QuestionKind::SingleAnswer, 4);
    let choice = Submission::Choice(single.answers[0].id);
    group.bench_function("single_answer", |b| {
        b.iter(|| grade(black_box(&single), black_box(&choice)))
    });

    let multiple = make_question(QuestionKind::MultipleAnswer, 16);
    let choices = Submission::Choices(multiple.answers.iter().map(|a| a.id).collect());
    group.bench_function("multiple_answer_16", |b| {
        b.iter(|| grade(black_box(&multiple), black_box(&choices)))
    });

    let sorting = make_question(QuestionKind::Sorting, 16);
    let ordering = Submission::Ordering(sorting.answers.iter().map(|a| a.id).collect());
    group.bench_function("sorting_16", |b| {
        b.iter(|| grade(black_box(&sorting), black_box(&ordering)))
    });

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_free_text");

    group.bench_function("short", |b| {
        b.iter(|| normalize_free_text(black_box("  San  Salvador.  ")))
    });

    let long = "The quick, brown fox - jumps over the lazy dog. ".repeat(20);
    group.bench_function("long", |b| b.iter(|| normalize_free_text(black_box(&long))));

    group.finish();
}

criterion_group!(benches, bench_grade, bench_normalize);
criterion_main!(benches);
