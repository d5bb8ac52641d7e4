//! Integration tests for bindings and mandatory bindings.

mod common;

use std::cell::RefCell;

use common::{FIRST_NAME_MISSING, FormatName, GreetError, LAST_NAME_MISSING, Tag, greet};
use resumable::binding::{Bindings, always_sync, bind_sync};
use resumable::computation::{Computation, ComputationExt, perform, pure};
use resumable::drive::drive_sync;
use resumable::handler::{HandlerTable, Unhandled, from_fn};
use rstest::rstest;

const DISPOSITION_MISSING: &str = "disposition_missing";

/// Greets a person, asking for any missing name part and the disposition.
fn greet_with_disposition(
    (first, last, disposition): (Option<&str>, Option<&str>, Option<&str>),
) -> impl Computation<Tag = Tag, Value = String, Output = String, Error = GreetError> + use<> {
    let disposition = disposition.map(str::to_string);
    FormatName::new(first, last).and_then(move |name| {
        let disposition = match disposition {
            Some(disposition) => pure::<Tag, String, _, GreetError>(Some(disposition)).boxed(),
            None => perform::<Tag, String, GreetError>(DISPOSITION_MISSING).boxed(),
        };
        disposition.map(move |disposition| match disposition.as_deref() {
            Some("hostile") => format!("Go away, {name}."),
            _ => format!("Hello, {name}!"),
        })
    })
}

fn names(first: &str, last: &str) -> HandlerTable<Tag, String, GreetError> {
    HandlerTable::new()
        .with_value(FIRST_NAME_MISSING, first.to_string())
        .with_value(LAST_NAME_MISSING, last.to_string())
}

// =============================================================================
// Precedence
// =============================================================================

#[rstest]
fn binding_wins_over_the_driver() {
    let greet_toodle = bind_sync(
        |(): ()| greet(None, None),
        HandlerTable::new().with_value(FIRST_NAME_MISSING, "Toodle".to_string()),
    );

    assert_eq!(
        drive_sync(greet_toodle(()), names("Beebop", "Deedoo")),
        Ok("Hello, Toodle Deedoo".to_string())
    );
}

#[rstest]
fn bound_disposition_ignores_the_driver() {
    let hostile_greet = bind_sync(
        greet_with_disposition,
        HandlerTable::new().with_value(DISPOSITION_MISSING, "hostile".to_string()),
    );
    let handler = names("Baba", "Voss").with_value(DISPOSITION_MISSING, "friendly".to_string());

    assert_eq!(
        drive_sync(hostile_greet((None, Some("Voss"), None)), handler),
        Ok("Go away, Baba Voss.".to_string())
    );
}

#[rstest]
#[case(Some("friendly"), "Hello, Baba Voss!")]
#[case(Some("hostile"), "Go away, Baba Voss.")]
#[case(None, "Go away, Baba Voss.")]
fn argument_supplied_disposition_skips_the_effect(
    #[case] disposition: Option<&str>,
    #[case] expected: &str,
) {
    let hostile_greet = bind_sync(
        greet_with_disposition,
        HandlerTable::new().with_value(DISPOSITION_MISSING, "hostile".to_string()),
    );

    assert_eq!(
        drive_sync(
            hostile_greet((Some("Baba"), Some("Voss"), disposition)),
            Unhandled
        ),
        Ok(expected.to_string())
    );
}

// =============================================================================
// Forwarding
// =============================================================================

#[rstest]
fn driver_sees_only_unbound_effects() {
    let seen = RefCell::new(Vec::new());
    let handler = from_fn(|tag: &Tag, _: &[String]| {
        seen.borrow_mut().push(*tag);
        Ok(Some("Voss".to_string()))
    });
    let computation = greet(None, None)
        .with_bindings(HandlerTable::new().with_value(FIRST_NAME_MISSING, "Baba".to_string()));

    assert_eq!(
        drive_sync(computation, handler),
        Ok("Hello, Baba Voss".to_string())
    );
    assert_eq!(*seen.borrow(), [LAST_NAME_MISSING]);
}

#[rstest]
fn declining_function_binding_forwards_the_effect() {
    let bindings = from_fn(|tag: &Tag, _: &[String]| {
        Ok((*tag == LAST_NAME_MISSING).then(|| "Jun".to_string()))
    });
    let computation = greet(None, None).with_bindings(bindings);

    assert_eq!(
        drive_sync(computation, names("Tamacti", "Voss")),
        Ok("Hello, Tamacti Jun".to_string())
    );
}

#[rstest]
fn forwarded_absent_marker_reaches_the_computation() {
    let computation = greet(None, None)
        .with_bindings(HandlerTable::new().with_value(FIRST_NAME_MISSING, "Baba".to_string()));

    assert_eq!(
        drive_sync(computation, Unhandled),
        Err(GreetError::MissingName(LAST_NAME_MISSING))
    );
}

#[rstest]
fn inner_binding_layer_takes_precedence() {
    let computation = greet(None, None)
        .with_bindings(HandlerTable::new().with_value(FIRST_NAME_MISSING, "Inner".to_string()))
        .with_bindings(names("Outer", "Outer"));

    assert_eq!(
        drive_sync(computation, names("Driver", "Driver")),
        Ok("Hello, Inner Outer".to_string())
    );
}

#[rstest]
fn failing_binding_is_seen_by_the_computation() {
    let computation = greet(None, None).with_bindings(
        HandlerTable::new().with_function(FIRST_NAME_MISSING, |_, _| {
            Err(GreetError::Handler("binding failed".to_string()))
        }),
    );

    assert_eq!(
        drive_sync(computation, names("Baba", "Voss")),
        Err(GreetError::Handler("binding failed".to_string()))
    );
}

// =============================================================================
// Mandatory Bindings
// =============================================================================

#[rstest]
fn mandatory_binding_is_never_overridden() {
    let hostile_greet = always_sync(
        greet_with_disposition,
        Bindings::new().with(DISPOSITION_MISSING, "hostile".to_string()),
    );
    let handler = names("Baba", "Voss").with_value(DISPOSITION_MISSING, "friendly".to_string());

    assert_eq!(
        drive_sync(hostile_greet((None, None, None)), handler),
        Ok("Go away, Baba Voss.".to_string())
    );
}

#[rstest]
fn mandatory_binding_honors_empty_value() {
    let greet_nobody = always_sync(
        |(): ()| greet(None, Some("Voss")),
        Bindings::new().with(FIRST_NAME_MISSING, String::new()),
    );

    assert_eq!(
        drive_sync(greet_nobody(()), names("Baba", "Voss")),
        Ok("Hello,  Voss".to_string())
    );
}

#[rstest]
fn mandatory_bindings_forward_non_members() {
    let seen = RefCell::new(Vec::new());
    let handler = from_fn(|tag: &Tag, _: &[String]| {
        seen.borrow_mut().push(*tag);
        Ok(Some("Voss".to_string()))
    });
    let computation = greet(None, None)
        .with_mandatory_bindings(Bindings::new().with(FIRST_NAME_MISSING, "Baba".to_string()));

    assert_eq!(
        drive_sync(computation, handler),
        Ok("Hello, Baba Voss".to_string())
    );
    assert_eq!(*seen.borrow(), [LAST_NAME_MISSING]);
}

// =============================================================================
// Asynchronous Bindings
// =============================================================================

#[cfg(feature = "async")]
mod asynchronous {
    use super::*;
    use resumable::binding::{always, bind};
    use resumable::drive::drive_async;
    use resumable::handler::{AsyncHandlerTable, from_async_fn};

    #[rstest]
    #[tokio::test]
    async fn awaited_binding_wins_over_the_driver() {
        let greet_toodle = bind(
            |(): ()| greet(None, None),
            AsyncHandlerTable::new().with_async_function(FIRST_NAME_MISSING, |_, _| async {
                tokio::task::yield_now().await;
                Ok::<_, GreetError>(Some("Toodle".to_string()))
            }),
        );

        assert_eq!(
            drive_async(greet_toodle(()), names("Beebop", "Deedoo")).await,
            Ok("Hello, Toodle Deedoo".to_string())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn awaited_driver_resolves_forwarded_effects() {
        let greet_baba = bind(
            |(): ()| greet(None, None),
            HandlerTable::new().with_value(FIRST_NAME_MISSING, "Baba".to_string()),
        );
        let handler = from_async_fn(|tag: &Tag, _: &[String]| {
            let tag = *tag;
            async move {
                assert_eq!(tag, LAST_NAME_MISSING);
                Ok::<_, GreetError>(Some("Voss".to_string()))
            }
        });

        assert_eq!(
            drive_async(greet_baba(()), handler).await,
            Ok("Hello, Baba Voss".to_string())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn failed_async_binding_is_injected_and_recovered() {
        let greet_guarded = bind(
            |(): ()| {
                perform::<Tag, String, GreetError>(FIRST_NAME_MISSING)
                    .or_else(|_| pure(Some("Stranger".to_string())))
                    .and_then(|first| {
                        perform(LAST_NAME_MISSING).map(move |last| {
                            format!(
                                "Hello, {} {}",
                                first.unwrap_or_default(),
                                last.unwrap_or_default()
                            )
                        })
                    })
            },
            AsyncHandlerTable::new().with_async_function(FIRST_NAME_MISSING, |_, _| async {
                tokio::task::yield_now().await;
                Err::<Option<String>, _>(GreetError::Handler("registry offline".to_string()))
            }),
        );
        let handler = from_async_fn(|tag: &Tag, _: &[String]| {
            let tag = *tag;
            async move {
                assert_eq!(tag, LAST_NAME_MISSING);
                Ok::<_, GreetError>(Some("Voss".to_string()))
            }
        });

        assert_eq!(
            drive_async(greet_guarded(()), handler).await,
            Ok("Hello, Stranger Voss".to_string())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn async_mandatory_binding_is_never_overridden() {
        let hostile_greet = always(
            greet_with_disposition,
            Bindings::new().with(DISPOSITION_MISSING, "hostile".to_string()),
        );
        let handler = names("Baba", "Voss").with_value(DISPOSITION_MISSING, "friendly".to_string());

        assert_eq!(
            drive_async(hostile_greet((None, Some("Voss"), None)), handler).await,
            Ok("Go away, Baba Voss.".to_string())
        );
    }
}
