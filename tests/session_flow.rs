//! Whole-session runs against a scripted question source, in virtual time.

use std::sync::Mutex;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use reqwest::StatusCode;
use tokio::sync::mpsc::UnboundedReceiver;
use trivia_quiz::source::{FetchedQuestions, QuestionRequest, ResponseCode};
use trivia_quiz::{
    App, Difficulty, FetchError, Phase, Question, QuestionSource, QuizConfig, SessionController,
    SessionEvent, SessionState, SessionTiming, StartError, ValidationError,
};

struct ScriptedSource {
    code: ResponseCode,
    questions: Vec<Question>,
    failure: Option<StatusCode>,
    requests: Mutex<Vec<QuestionRequest>>,
}

impl ScriptedSource {
    fn ok(questions: Vec<Question>) -> Self {
        Self {
            code: ResponseCode::SUCCESS,
            questions,
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn rejecting(code: ResponseCode) -> Self {
        Self {
            code,
            questions: Vec::new(),
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn unreachable(status: StatusCode) -> Self {
        Self {
            failure: Some(status),
            ..Self::rejecting(ResponseCode::SUCCESS)
        }
    }
}

impl QuestionSource for ScriptedSource {
    async fn fetch(&self, request: &QuestionRequest) -> Result<FetchedQuestions, FetchError> {
        self.requests.lock().unwrap().push(*request);
        if let Some(status) = self.failure {
            return Err(FetchError::Http(status));
        }
        Ok(FetchedQuestions {
            code: self.code,
            questions: self.questions.clone(),
        })
    }
}

fn abcd_question(prompt: &str) -> Question {
    Question::new(prompt, "B", vec!["A".into(), "C".into(), "D".into()])
}

fn scenario_config() -> QuizConfig {
    QuizConfig::new(1, 18, Difficulty::Easy).unwrap()
}

fn controller(
    source: ScriptedSource,
) -> (
    SessionController<ScriptedSource>,
    UnboundedReceiver<SessionEvent>,
) {
    let (controller, rx) = SessionController::new(source, SessionTiming::default());
    (controller.with_rng(StdRng::seed_from_u64(99)), rx)
}

fn assert_invariants(state: &SessionState, phase: Phase) {
    let correct = state.answers().iter().filter(|a| a.was_correct).count();
    assert_eq!(state.score() as usize, correct);
    assert!(state.time_remaining() <= state.time_budget());
    match phase {
        Phase::InProgress => {
            assert_eq!(state.answers().len(), state.current_index());
            assert!(state.current_index() < state.total_questions());
        }
        Phase::Ended => assert_eq!(state.answers().len(), state.total_questions()),
        _ => {}
    }
}

/// Feed timer events back until the session ends, checking invariants at
/// every step.
async fn drive_until_ended(
    controller: &mut SessionController<ScriptedSource>,
    rx: &mut UnboundedReceiver<SessionEvent>,
) {
    for _ in 0..500 {
        if controller.phase() == Phase::Ended {
            return;
        }
        let event = rx.recv().await.expect("timer channel closed");
        controller.handle_event(event);
        if let Some(state) = controller.state() {
            assert_invariants(state, controller.phase());
        }
    }
    panic!("session did not end");
}

#[tokio::test(start_paused = true)]
async fn test_correct_answer_scenario() {
    let (mut controller, mut rx) = controller(ScriptedSource::ok(vec![abcd_question("Pick B")]));
    controller.start(scenario_config()).await.unwrap();
    assert_eq!(controller.phase(), Phase::InProgress);
    assert_eq!(controller.state().unwrap().total_questions(), 1);

    assert_eq!(controller.submit_answer(Some("B")), Ok(true));
    // Still showing feedback until the delay passes.
    assert_eq!(controller.phase(), Phase::InProgress);

    drive_until_ended(&mut controller, &mut rx).await;

    let state = controller.state().unwrap();
    assert_eq!(state.score(), 1);
    assert_eq!(state.answers().len(), 1);
    let answer = &state.answers()[0];
    assert_eq!(answer.selected_option.as_deref(), Some("B"));
    assert_eq!(answer.correct_answer, "B");
    assert!(answer.was_correct);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_scenario() {
    let (mut controller, mut rx) = controller(ScriptedSource::ok(vec![abcd_question("Pick B")]));
    let started = tokio::time::Instant::now();
    controller.start(scenario_config()).await.unwrap();

    drive_until_ended(&mut controller, &mut rx).await;

    let state = controller.state().unwrap();
    assert_eq!(state.score(), 0);
    assert_eq!(state.answers().len(), 1);
    assert_eq!(state.answers()[0].selected_option, None);
    assert_eq!(state.answers()[0].correct_answer, "B");
    assert!(!state.answers()[0].was_correct);
    assert!(state.elapsed_total() >= 15);
    // 15 s countdown plus the 1 s feedback pause.
    assert!(started.elapsed() >= Duration::from_secs(16));
}

#[tokio::test(start_paused = true)]
async fn test_rejected_request_stays_in_setup() {
    let (mut controller, _rx) = controller(ScriptedSource::rejecting(ResponseCode::NO_RESULTS));
    let config = QuizConfig::new(10, 19, Difficulty::Hard).unwrap();

    let err = controller.start(config).await.unwrap_err();
    assert!(matches!(
        err,
        StartError::Validation(ValidationError::Rejected(ResponseCode::NO_RESULTS))
    ));
    assert!(err.notice().contains("Not enough questions available"));
    assert_eq!(controller.phase(), Phase::Setup);
    assert!(controller.state().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_request_carries_config() {
    let source = ScriptedSource::ok(vec![abcd_question("one")]);
    let (mut controller, _rx) = controller(source);
    controller.start(scenario_config()).await.unwrap();
    controller.start(scenario_config()).await.unwrap();

    let requests = controller.source().requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0],
        QuestionRequest {
            amount: 1,
            category: 18,
            difficulty: Difficulty::Easy,
        }
    );
    assert_eq!(controller.phase(), Phase::InProgress);
}

#[tokio::test(start_paused = true)]
async fn test_mixed_session_keeps_invariants() {
    let questions: Vec<_> = (0..4).map(|i| abcd_question(&format!("Q{}", i))).collect();
    let (mut controller, mut rx) = controller(ScriptedSource::ok(questions));
    let config = QuizConfig::new(4, 9, Difficulty::Any).unwrap();
    controller.start(config).await.unwrap();

    let mut last_index = None;
    for _ in 0..500 {
        if controller.phase() == Phase::Ended {
            break;
        }
        let state = controller.state().unwrap();
        let index = state.current_index();
        if last_index != Some(index) && !state.input_locked() {
            last_index = Some(index);
            // Answer correctly on even questions, wrongly on the first odd
            // one and not at all on the last.
            match index {
                0 | 2 => assert_eq!(controller.submit_answer(Some("B")), Ok(true)),
                1 => {
                    assert_eq!(controller.submit_answer(Some("A")), Ok(true));
                    assert_eq!(controller.submit_answer(Some("B")), Ok(false));
                }
                _ => {}
            }
        }
        let event = rx.recv().await.unwrap();
        controller.handle_event(event);
        assert_invariants(controller.state().unwrap(), controller.phase());
    }

    assert_eq!(controller.phase(), Phase::Ended);
    let state = controller.state().unwrap();
    let outcomes: Vec<_> = state.answers().iter().map(|a| a.was_correct).collect();
    assert_eq!(outcomes, vec![true, false, true, false]);
    assert_eq!(state.score(), 2);
    assert_eq!(state.answers()[3].selected_option, None);
}

#[tokio::test(start_paused = true)]
async fn test_options_stable_across_ticks() {
    let questions: Vec<_> = (0..2).map(|i| abcd_question(&format!("Q{}", i))).collect();
    let (mut controller, mut rx) = controller(ScriptedSource::ok(questions));
    controller
        .start(QuizConfig::new(2, 18, Difficulty::Any).unwrap())
        .await
        .unwrap();

    let before = controller.state().unwrap().options().to_vec();
    let mut sorted = before.clone();
    sorted.sort();
    assert_eq!(sorted, vec!["A", "B", "C", "D"]);

    for _ in 0..5 {
        let event = rx.recv().await.unwrap();
        controller.handle_event(event);
        assert_eq!(controller.state().unwrap().options(), before.as_slice());
    }
    assert_eq!(controller.state().unwrap().time_remaining(), 10);
}

#[tokio::test(start_paused = true)]
async fn test_restart_ignores_old_timers() {
    let questions: Vec<_> = (0..3).map(|i| abcd_question(&format!("Q{}", i))).collect();
    let (mut controller, mut rx) = controller(ScriptedSource::ok(questions));
    let config = QuizConfig::new(3, 18, Difficulty::Any).unwrap();

    controller.start(config).await.unwrap();
    controller.submit_answer(Some("B")).unwrap();
    let first = controller.state().unwrap().id();

    // Restart before the feedback delay of the first session fires.
    controller.start(config).await.unwrap();
    let second = controller.state().unwrap().id();
    assert_ne!(first, second);

    for _ in 0..3 {
        let event = rx.recv().await.unwrap();
        controller.handle_event(event);
    }

    let state = controller.state().unwrap();
    assert_eq!(state.id(), second);
    assert_eq!(state.current_index(), 0);
    assert!(state.answers().is_empty());
    assert_eq!(state.time_remaining(), 12);
}

#[tokio::test(start_paused = true)]
async fn test_app_start_failure_sets_notice() {
    let (controller, _rx) = controller(ScriptedSource::rejecting(ResponseCode::NO_RESULTS));
    let mut app = App::new(controller, &QuizConfig::default());

    assert!(app.start_quiz().await.is_err());
    assert_eq!(app.phase(), Phase::Setup);
    assert!(app.notice().unwrap().starts_with("Not enough questions available"));
    assert_eq!(app.form().count, 5);
}

#[tokio::test(start_paused = true)]
async fn test_unreachable_source_stays_in_setup() {
    let (mut controller, _rx) = controller(ScriptedSource::unreachable(StatusCode::BAD_GATEWAY));

    let err = controller.start(scenario_config()).await.unwrap_err();
    assert!(matches!(
        err,
        StartError::Fetch(FetchError::Http(status)) if status == StatusCode::BAD_GATEWAY
    ));
    assert_eq!(controller.phase(), Phase::Setup);
    assert!(controller.state().is_none());
    assert_eq!(controller.source().requests.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_unreachable_source_keeps_form() {
    let (controller, _rx) = controller(ScriptedSource::unreachable(StatusCode::BAD_GATEWAY));
    let mut app = App::new(
        controller,
        &QuizConfig::new(7, 19, Difficulty::Hard).unwrap(),
    );
    app.form_mut().increase();
    let form_before = app.form().clone();

    let err = app.start_quiz().await.unwrap_err();
    assert!(matches!(err, StartError::Fetch(_)));
    assert_eq!(app.phase(), Phase::Setup);
    assert!(app.session().is_none());
    assert!(
        app.notice()
            .unwrap()
            .starts_with("Could not reach the question server")
    );
    assert_eq!(app.form(), &form_before);

    // The notice is retryable: the same form is sent again on the next start.
    assert!(app.start_quiz().await.is_err());
    assert_eq!(app.controller().source().requests.lock().unwrap().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_app_highlight_resets_on_next_question() {
    let questions: Vec<_> = (0..2).map(|i| abcd_question(&format!("Q{}", i))).collect();
    let (controller, mut rx) = controller(ScriptedSource::ok(questions));
    let mut app = App::new(
        controller,
        &QuizConfig::new(2, 18, Difficulty::Any).unwrap(),
    );
    app.start_quiz().await.unwrap();
    assert!(app.notice().is_none());

    app.select_next_option();
    app.select_next_option();
    assert_eq!(app.highlighted_option(), 2);
    app.submit_highlighted();
    assert!(app.session().unwrap().input_locked());

    while app.session().unwrap().current_index() == 0 {
        let event = rx.recv().await.unwrap();
        app.handle_event(event);
    }
    assert_eq!(app.highlighted_option(), 0);
    assert_eq!(app.session().unwrap().answers().len(), 1);

    app.back_to_setup();
    assert_eq!(app.phase(), Phase::Setup);
    assert!(app.session().is_none());
}
