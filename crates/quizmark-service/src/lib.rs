//! quizmark-service — The operation surface over the core and the store.
//!
//! One [`QuizService`] exposes the create/update/remove operations for
//! quizzes and questions plus answer submission. Every operation opens one
//! store transaction at its outermost entry point and threads it through;
//! a failure anywhere drops the transaction, so no partial mutation is
//! ever observable.

mod question;
mod quiz;
mod submit;

use std::sync::Arc;

use quizmark_core::store::QuizStore;

/// Service handle over a record store.
#[derive(Clone)]
pub struct QuizService {
    store: Arc<dyn QuizStore>,
}

impl QuizService {
    pub fn new(store: Arc<dyn QuizStore>) -> Self {
        Self { store }
    }
}
