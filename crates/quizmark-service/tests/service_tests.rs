//! End-to-end service tests over the in-memory store.
//!
//! These exercise the full operation surface: atomic quiz/question
//! creation, the answer reconciler with its ownership and duplicate
//! checks, and submission grading with score aggregation.

use std::sync::Arc;

use uuid::Uuid;

use quizmark_core::input::{
    CreateAnswerInput, CreateQuestionInput, CreateQuizInput, SubmittedAnswer, UpdateAnswerInput,
    UpdateQuestionInput, UpdateQuizInput,
};
use quizmark_core::model::{Question, QuestionKind, Quiz};
use quizmark_service::QuizService;
use quizmark_store::MemoryStore;

fn service() -> QuizService {
    QuizService::new(Arc::new(MemoryStore::new()))
}

fn choice(text: &str, correct: bool) -> CreateAnswerInput {
    CreateAnswerInput {
        text: text.into(),
        correct: Some(correct),
        position: None,
    }
}

fn single_question(text: &str, answers: Vec<CreateAnswerInput>) -> CreateQuestionInput {
    CreateQuestionInput {
        text: text.into(),
        kind: QuestionKind::SingleAnswer,
        answers,
        quiz_id: None,
    }
}

/// Quiz from the aggregation property: Q1's correct answer is Paris, Q2's
/// is London.
async fn capitals_quiz(service: &QuizService) -> Quiz {
    service
        .create_quiz(CreateQuizInput {
            name: "Capitals".into(),
            questions: vec![
                single_question(
                    "What is the capital of France?",
                    vec![choice("Paris", true), choice("London", false)],
                ),
                single_question(
                    "What is the capital of the UK?",
                    vec![choice("Paris", false), choice("London", true)],
                ),
            ],
        })
        .await
        .unwrap()
}

fn answer_id(question: &Question, text: &str) -> Uuid {
    question
        .answers
        .iter()
        .find(|a| a.text == text)
        .unwrap_or_else(|| panic!("no answer '{text}'"))
        .id
}

#[tokio::test]
async fn create_quiz_assigns_ids_and_persists_graph() {
    let service = service();
    let quiz = capitals_quiz(&service).await;

    assert_eq!(quiz.name, "Capitals");
    assert_eq!(quiz.questions.len(), 2);
    for question in &quiz.questions {
        assert_eq!(question.quiz_id, quiz.id);
        assert_eq!(question.answers.len(), 2);
        for answer in &question.answers {
            assert_eq!(answer.question_id, question.id);
        }
    }
}

#[tokio::test]
async fn create_quiz_with_empty_name_rejected() {
    let service = service();
    let err = service
        .create_quiz(CreateQuizInput {
            name: String::new(),
            questions: vec![],
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "EMPTY_FIELD");
}

#[tokio::test]
async fn create_quiz_with_invalid_question_rolls_back_entirely() {
    let service = service();
    let err = service
        .create_quiz(CreateQuizInput {
            name: "Broken".into(),
            questions: vec![
                single_question("Fine", vec![choice("A", true), choice("B", false)]),
                single_question("Broken", vec![choice("A", true), choice("B", true)]),
            ],
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_ANSWER_COUNT");
}

#[tokio::test]
async fn create_question_requires_existing_quiz() {
    let service = service();
    let mut input = single_question("Orphan?", vec![choice("A", true)]);
    input.quiz_id = Some(Uuid::new_v4());
    let err = service.create_question(input).await.unwrap_err();
    assert_eq!(err.code(), "QUIZ_NOT_FOUND");
}

#[tokio::test]
async fn create_question_with_duplicate_answers_rejected() {
    let service = service();
    let quiz = capitals_quiz(&service).await;

    let mut input = single_question(
        "Capital of Spain?",
        vec![choice("Paris", true), choice("Paris", false)],
    );
    input.quiz_id = Some(quiz.id);
    let err = service.create_question(input).await.unwrap_err();
    assert_eq!(err.code(), "DUPLICATE_ANSWER");
}

#[tokio::test]
async fn update_question_edits_deletes_and_adds() {
    let service = service();
    let quiz = capitals_quiz(&service).await;
    let question = &quiz.questions[0];

    let updated = service
        .update_question(UpdateQuestionInput {
            id: question.id,
            text: Some("Which city is the capital of France?".into()),
            answers: vec![UpdateAnswerInput {
                id: answer_id(question, "London"),
                text: Some("Lyon".into()),
                correct: None,
                position: None,
            }],
            new_answers: vec![choice("Marseille", false)],
            delete_answers: vec![],
        })
        .await
        .unwrap();

    assert_eq!(updated.text, "Which city is the capital of France?");
    let texts: Vec<&str> = updated.answers.iter().map(|a| a.text.as_str()).collect();
    assert_eq!(texts, vec!["Paris", "Lyon", "Marseille"]);

    let removed = service
        .update_question(UpdateQuestionInput {
            id: question.id,
            text: None,
            answers: vec![],
            new_answers: vec![],
            delete_answers: vec![answer_id(&updated, "Marseille")],
        })
        .await
        .unwrap();
    assert_eq!(removed.answers.len(), 2);
}

#[tokio::test]
async fn update_rejects_duplicate_of_existing_answer() {
    let service = service();
    let quiz = capitals_quiz(&service).await;

    let err = service
        .update_question(UpdateQuestionInput {
            id: quiz.questions[0].id,
            text: None,
            answers: vec![],
            new_answers: vec![choice("Paris", false)],
            delete_answers: vec![],
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "DUPLICATE_ANSWER");
}

#[tokio::test]
async fn update_delete_then_add_same_text_still_rejected() {
    // The uniqueness check runs against the snapshot taken before the
    // deletion is applied, so freeing up a name within the same call does
    // not take effect. Conservative, but pinned here on purpose.
    let service = service();
    let quiz = capitals_quiz(&service).await;
    let question = &quiz.questions[0];

    let err = service
        .update_question(UpdateQuestionInput {
            id: question.id,
            text: None,
            answers: vec![],
            new_answers: vec![choice("Paris", true)],
            delete_answers: vec![answer_id(question, "Paris")],
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "DUPLICATE_ANSWER");
}

#[tokio::test]
async fn update_foreign_answer_fails_and_rolls_back() {
    let service = service();
    let quiz = capitals_quiz(&service).await;
    let q1 = &quiz.questions[0];
    let q2 = &quiz.questions[1];

    // Editing q2's answer through q1, plus a rename that would otherwise
    // stick; the whole update must be rolled back.
    let err = service
        .update_question(UpdateQuestionInput {
            id: q1.id,
            text: Some("Should not survive".into()),
            answers: vec![UpdateAnswerInput {
                id: answer_id(q2, "London"),
                text: Some("Hijacked".into()),
                correct: None,
                position: None,
            }],
            new_answers: vec![],
            delete_answers: vec![],
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "ANSWER_NOT_OWNED");

    // Deleting a foreign answer fails the same way.
    let err = service
        .update_question(UpdateQuestionInput {
            id: q1.id,
            text: None,
            answers: vec![],
            new_answers: vec![],
            delete_answers: vec![answer_id(q2, "London")],
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "ANSWER_NOT_OWNED");

    // Nothing changed: q1 kept its text, q2 kept its answer.
    let result = service
        .submit_answers(
            quiz.id,
            &[SubmittedAnswer {
                question_id: q1.id,
                answers: vec![answer_id(q1, "Paris").to_string()],
            }],
        )
        .await
        .unwrap();
    let graded_q1 = result
        .questions
        .iter()
        .find(|r| r.question_id == q1.id)
        .unwrap();
    assert_eq!(graded_q1.question_text, "What is the capital of France?");
    let unanswered_q2 = result
        .questions
        .iter()
        .find(|r| r.question_id == q2.id)
        .unwrap();
    assert_eq!(unanswered_q2.correct_answers[0].text, "London");
}

#[tokio::test]
async fn update_missing_question_not_found() {
    let service = service();
    capitals_quiz(&service).await;

    let err = service
        .update_question(UpdateQuestionInput {
            id: Uuid::new_v4(),
            text: None,
            answers: vec![],
            new_answers: vec![],
            delete_answers: vec![],
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "QUESTION_NOT_FOUND");
}

#[tokio::test]
async fn remove_question_returns_it_and_cascades() {
    let service = service();
    let quiz = capitals_quiz(&service).await;
    let q1 = &quiz.questions[0];

    let removed = service.remove_question(q1.id).await.unwrap();
    assert_eq!(removed.id, q1.id);
    assert_eq!(removed.answers.len(), 2);

    let err = service.remove_question(q1.id).await.unwrap_err();
    assert_eq!(err.code(), "QUESTION_NOT_FOUND");

    // The quiz now grades over a single question.
    let q2 = &quiz.questions[1];
    let result = service
        .submit_answers(
            quiz.id,
            &[SubmittedAnswer {
                question_id: q2.id,
                answers: vec![answer_id(q2, "London").to_string()],
            }],
        )
        .await
        .unwrap();
    assert_eq!(result.score, 100.0);
    assert_eq!(result.questions.len(), 1);
}

#[tokio::test]
async fn update_quiz_renames() {
    let service = service();
    let quiz = capitals_quiz(&service).await;

    let updated = service
        .update_quiz(UpdateQuizInput {
            id: quiz.id,
            name: "World Capitals".into(),
        })
        .await
        .unwrap();
    assert_eq!(updated.name, "World Capitals");
    assert_eq!(updated.questions.len(), 2);
}

#[tokio::test]
async fn remove_quiz_cascades_and_submission_fails_afterwards() {
    let service = service();
    let quiz = capitals_quiz(&service).await;

    let removed = service.remove_quiz(quiz.id).await.unwrap();
    assert_eq!(removed.id, quiz.id);

    let err = service.submit_answers(quiz.id, &[]).await.unwrap_err();
    assert_eq!(err.code(), "QUIZ_NOT_FOUND");

    let err = service
        .remove_question(quiz.questions[0].id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "QUESTION_NOT_FOUND");
}

#[tokio::test]
async fn submit_half_correct_scores_fifty() {
    let service = service();
    let quiz = capitals_quiz(&service).await;
    let q1 = &quiz.questions[0];
    let q2 = &quiz.questions[1];

    let result = service
        .submit_answers(
            quiz.id,
            &[SubmittedAnswer {
                question_id: q1.id,
                answers: vec![answer_id(q1, "Paris").to_string()],
            }],
        )
        .await
        .unwrap();

    assert_eq!(result.score, 50.0);
    assert_eq!(result.questions.len(), 2);

    let graded = result
        .questions
        .iter()
        .find(|r| r.question_id == q1.id)
        .unwrap();
    assert!(graded.answered);
    assert!(graded.correct);

    let skipped = result
        .questions
        .iter()
        .find(|r| r.question_id == q2.id)
        .unwrap();
    assert!(!skipped.answered);
    assert!(!skipped.correct);
    assert!(skipped.given_answers.is_empty());
    assert_eq!(skipped.correct_answers.len(), 1);
    assert_eq!(skipped.correct_answers[0].text, "London");
}

#[tokio::test]
async fn submit_score_rounds_to_two_decimals() {
    let service = service();
    let quiz = service
        .create_quiz(CreateQuizInput {
            name: "Thirds".into(),
            questions: vec![
                single_question("One?", vec![choice("Yes", true), choice("No", false)]),
                single_question("Two?", vec![choice("Yes", true), choice("No", false)]),
                single_question("Three?", vec![choice("Yes", true), choice("No", false)]),
            ],
        })
        .await
        .unwrap();

    let q1 = &quiz.questions[0];
    let result = service
        .submit_answers(
            quiz.id,
            &[SubmittedAnswer {
                question_id: q1.id,
                answers: vec![answer_id(q1, "Yes").to_string()],
            }],
        )
        .await
        .unwrap();
    assert_eq!(result.score, 33.33);
}

#[tokio::test]
async fn submit_rejects_question_from_another_quiz() {
    let service = service();
    let quiz_a = capitals_quiz(&service).await;
    let quiz_b = service
        .create_quiz(CreateQuizInput {
            name: "Other".into(),
            questions: vec![single_question(
                "Capital of Spain?",
                vec![choice("Madrid", true), choice("Barcelona", false)],
            )],
        })
        .await
        .unwrap();

    let foreign = &quiz_b.questions[0];
    let own = &quiz_a.questions[0];
    let err = service
        .submit_answers(
            quiz_a.id,
            &[
                SubmittedAnswer {
                    question_id: own.id,
                    answers: vec![answer_id(own, "Paris").to_string()],
                },
                SubmittedAnswer {
                    question_id: foreign.id,
                    answers: vec![answer_id(foreign, "Madrid").to_string()],
                },
            ],
        )
        .await
        .unwrap_err();

    // All-or-nothing: the valid first answer does not produce a result.
    assert_eq!(err.code(), "QUESTION_NOT_IN_QUIZ");
}

#[tokio::test]
async fn submit_rejects_answer_id_from_another_question() {
    let service = service();
    let quiz = capitals_quiz(&service).await;
    let q1 = &quiz.questions[0];
    let q2 = &quiz.questions[1];

    let err = service
        .submit_answers(
            quiz.id,
            &[SubmittedAnswer {
                question_id: q1.id,
                // Same text, but the record belongs to q2.
                answers: vec![answer_id(q2, "Paris").to_string()],
            }],
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "UNKNOWN_ANSWER");
}

#[tokio::test]
async fn submit_unknown_question_not_found() {
    let service = service();
    let quiz = capitals_quiz(&service).await;

    let err = service
        .submit_answers(
            quiz.id,
            &[SubmittedAnswer {
                question_id: Uuid::new_v4(),
                answers: vec![Uuid::new_v4().to_string()],
            }],
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "QUESTION_NOT_FOUND");
}

#[tokio::test]
async fn submit_empty_quiz_scores_zero() {
    let service = service();
    let quiz = service
        .create_quiz(CreateQuizInput {
            name: "Empty".into(),
            questions: vec![],
        })
        .await
        .unwrap();

    let result = service.submit_answers(quiz.id, &[]).await.unwrap();
    assert_eq!(result.score, 0.0);
    assert!(result.questions.is_empty());
}

#[tokio::test]
async fn submit_grades_all_four_kinds() {
    let service = service();
    let quiz = service
        .create_quiz(CreateQuizInput {
            name: "Mixed".into(),
            questions: vec![
                single_question(
                    "Capital of France?",
                    vec![choice("Paris", true), choice("London", false)],
                ),
                CreateQuestionInput {
                    text: "European capitals?".into(),
                    kind: QuestionKind::MultipleAnswer,
                    answers: vec![
                        choice("Paris", true),
                        choice("London", true),
                        choice("Tokyo", false),
                    ],
                    quiz_id: None,
                },
                CreateQuestionInput {
                    text: "Order the years".into(),
                    kind: QuestionKind::Sorting,
                    answers: vec![
                        CreateAnswerInput {
                            text: "990".into(),
                            correct: None,
                            position: Some(1),
                        },
                        CreateAnswerInput {
                            text: "1290".into(),
                            correct: None,
                            position: Some(2),
                        },
                        CreateAnswerInput {
                            text: "1900".into(),
                            correct: None,
                            position: Some(3),
                        },
                    ],
                    quiz_id: None,
                },
                CreateQuestionInput {
                    text: "Capital of El Salvador?".into(),
                    kind: QuestionKind::PlainText,
                    answers: vec![CreateAnswerInput {
                        text: "San Salvador".into(),
                        correct: None,
                        position: None,
                    }],
                    quiz_id: None,
                },
            ],
        })
        .await
        .unwrap();

    let by_text = |text: &str| {
        quiz.questions
            .iter()
            .find(|q| q.text == text)
            .unwrap()
            .clone()
    };
    let single = by_text("Capital of France?");
    let multiple = by_text("European capitals?");
    let sorting = by_text("Order the years");
    let plain = by_text("Capital of El Salvador?");

    let result = service
        .submit_answers(
            quiz.id,
            &[
                SubmittedAnswer {
                    question_id: single.id,
                    answers: vec![answer_id(&single, "Paris").to_string()],
                },
                SubmittedAnswer {
                    question_id: multiple.id,
                    answers: vec![
                        answer_id(&multiple, "London").to_string(),
                        answer_id(&multiple, "Paris").to_string(),
                    ],
                },
                SubmittedAnswer {
                    question_id: sorting.id,
                    answers: vec![
                        answer_id(&sorting, "990").to_string(),
                        answer_id(&sorting, "1290").to_string(),
                        answer_id(&sorting, "1900").to_string(),
                    ],
                },
                SubmittedAnswer {
                    question_id: plain.id,
                    answers: vec!["  san SAlvador.  ".into()],
                },
            ],
        )
        .await
        .unwrap();

    assert_eq!(result.score, 100.0);
    assert!(result.questions.iter().all(|r| r.answered && r.correct));

    let sorted = result
        .questions
        .iter()
        .find(|r| r.question_id == sorting.id)
        .unwrap();
    let labels: Vec<&str> = sorted
        .correct_answers
        .iter()
        .map(|l| l.text.as_str())
        .collect();
    assert_eq!(labels, vec!["990 - 1", "1290 - 2", "1900 - 3"]);
}

#[tokio::test]
async fn submission_is_repeatable() {
    let service = service();
    let quiz = capitals_quiz(&service).await;
    let q1 = &quiz.questions[0];

    let submitted = [SubmittedAnswer {
        question_id: q1.id,
        answers: vec![answer_id(q1, "Paris").to_string()],
    }];
    let first = service.submit_answers(quiz.id, &submitted).await.unwrap();
    let second = service.submit_answers(quiz.id, &submitted).await.unwrap();
    assert_eq!(first.score, second.score);
    assert_eq!(first.questions.len(), second.questions.len());
}
