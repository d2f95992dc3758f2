//! Composition spans and rejection events, recorded with a test subscriber.
//!
//! Run with `--features tracing`.

#![cfg(feature = "tracing")]

use std::sync::{Arc, Mutex};

use ecm::prelude::*;
use tracing::{span, Event, Level, Subscriber};
use tracing_subscriber::{
    layer::{Context, SubscriberExt},
    Layer,
};

#[derive(Default)]
struct Log {
    spans:    Vec<&'static str>,
    warnings: Vec<&'static str>,
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Log>>);

impl<S: Subscriber> Layer<S> for Recorder {
    fn on_new_span(&self, attrs: &span::Attributes<'_>, _id: &span::Id, _ctx: Context<'_, S>) {
        self.0.lock().unwrap().spans.push(attrs.metadata().name());
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.lock().unwrap().warnings.push(event.metadata().target());
        }
    }
}

fn record(f: impl FnOnce()) -> Log {
    let recorder = Recorder::default();
    let subscriber = tracing_subscriber::registry().with(recorder.clone());
    tracing::subscriber::with_default(subscriber, f);
    let mut log = recorder.0.lock().unwrap();
    std::mem::take(&mut *log)
}

#[test]
fn composition_opens_a_span_per_phase() {
    const BASE: ClassDecl = ClassDecl::new("Base").var_fields(&[field::<u32>("a")]);

    let log = record(|| {
        let mut root = CompositionRoot::new();
        root.class(BASE).unwrap();
        root.compose().unwrap();
    });

    assert_eq!(log.spans.iter().filter(|s| **s == "compose").count(), 1);
    assert_eq!(log.spans.iter().filter(|s| **s == "compose_phase").count(), 3);
    assert!(log.spans.contains(&"define_class"));
    assert!(log.warnings.is_empty());
}

#[test]
fn rejected_composition_emits_one_warning() {
    static LINK: Association<u32> = Association::mandatory("node.link");

    let log = record(|| {
        let mut root = CompositionRoot::new();
        root.slot(&LINK).unwrap();
        assert!(root.compose().is_err());
    });

    assert_eq!(log.warnings.len(), 1);
    assert!(log.warnings[0].starts_with("ecm_model"));
}
