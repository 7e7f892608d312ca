//! Tests for the named handler registry on a logging context.

use splatlog::handler::{
    CastContext, ExportConfig, HandlerRef, NamedHandlerCast, SharedBuffer, same_handler,
    to_export_handler,
};
use splatlog::{Error, ExportHandler, HandlerValue, Level, Logging, OnConflict, Stream};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

fn buffer_export(logging: &Logging) -> SharedBuffer {
    let buffer = SharedBuffer::new();
    logging
        .set_named_handler("export", Stream::from(buffer.clone()))
        .unwrap();
    buffer
}

#[test]
fn builtins_start_registered_and_detached() {
    let logging = Logging::new();
    assert!(logging.get_named_handler("console").unwrap().is_none());
    assert!(logging.get_named_handler("export").unwrap().is_none());
    assert_eq!(logging.tree().handler_count(), 0);
}

#[test]
fn unknown_names_fail() {
    let logging = Logging::new();
    assert!(matches!(
        logging.set_named_handler("nope", true),
        Err(Error::UnknownHandler(_))
    ));
    assert!(matches!(
        logging.get_named_handler("nope"),
        Err(Error::UnknownHandler(_))
    ));
    assert!(matches!(
        logging.del_named_handler("nope"),
        Err(Error::UnknownHandler(_))
    ));
    assert!(matches!(
        logging.get_named_handler_cast("nope"),
        Err(Error::UnknownHandler(_))
    ));
}

#[test]
fn empty_name_is_a_validation_error() {
    let logging = Logging::new();
    let err = logging
        .register_named_handler("", NamedHandlerCast::export(), OnConflict::Raise)
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn set_replaces_the_attached_handler() {
    let logging = Logging::new();
    let first = buffer_export(&logging);
    let first_handler = logging.get_named_handler("export").unwrap().unwrap();
    let second = buffer_export(&logging);

    assert_eq!(logging.tree().handler_count(), 1);
    assert!(!logging.tree().contains_handler(&first_handler));

    logging.set_level("root", Level::Info);
    logging.get_logger("app").info("hello", ());
    assert!(first.contents().is_empty());
    assert!(second.contents().contains("hello"));
}

#[test]
fn off_detaches() {
    let logging = Logging::new();
    buffer_export(&logging);
    logging.set_named_handler("export", HandlerValue::Off).unwrap();
    assert!(logging.get_named_handler("export").unwrap().is_none());
    assert_eq!(logging.tree().handler_count(), 0);

    buffer_export(&logging);
    logging.set_named_handler("export", false).unwrap();
    assert_eq!(logging.tree().handler_count(), 0);

    buffer_export(&logging);
    logging.del_named_handler("export").unwrap();
    assert_eq!(logging.tree().handler_count(), 0);
}

#[test]
fn setting_the_same_handler_is_a_no_op() {
    let logging = Logging::new();
    let handler: HandlerRef = Arc::new(ExportHandler::new(Stream::from(SharedBuffer::new())));
    logging
        .set_named_handler("export", Arc::clone(&handler))
        .unwrap();
    logging
        .set_named_handler("export", Arc::clone(&handler))
        .unwrap();
    assert_eq!(logging.tree().handler_count(), 1);
    let current = logging.get_named_handler("export").unwrap().unwrap();
    assert!(same_handler(&current, &handler));
}

#[test]
fn cast_errors_leave_state_alone() {
    let logging = Logging::new();
    buffer_export(&logging);
    let before = logging.get_named_handler("export").unwrap().unwrap();

    let err = logging
        .set_named_handler("export", Level::Info)
        .unwrap_err();
    assert!(matches!(err, Error::Cast { .. }));

    let after = logging.get_named_handler("export").unwrap().unwrap();
    assert!(same_handler(&before, &after));
    assert_eq!(logging.tree().handler_count(), 1);
}

#[test]
fn export_config_needs_a_destination() {
    let logging = Logging::new();
    let err = logging
        .set_named_handler("export", ExportConfig::default())
        .unwrap_err();
    assert!(matches!(err, Error::Cast { .. }));
}

#[test]
fn register_conflicts() {
    let logging = Logging::new();
    let custom = NamedHandlerCast::new(to_export_handler);

    assert!(matches!(
        logging.register_named_handler("export", custom.clone(), OnConflict::Raise),
        Err(Error::DuplicateName(_))
    ));

    // Same cast again never conflicts.
    logging
        .register_named_handler("export", NamedHandlerCast::export(), OnConflict::Raise)
        .unwrap();

    logging
        .register_named_handler("export", custom.clone(), OnConflict::Ignore)
        .unwrap();
    assert_eq!(
        logging.get_named_handler_cast("export").unwrap(),
        NamedHandlerCast::export()
    );

    logging
        .register_named_handler("export", custom.clone(), OnConflict::Replace)
        .unwrap();
    assert_eq!(logging.get_named_handler_cast("export").unwrap(), custom);
}

#[test]
fn replace_keeps_attached_handler() {
    let logging = Logging::new();
    buffer_export(&logging);
    let attached = logging.get_named_handler("export").unwrap().unwrap();

    logging
        .register_named_handler(
            "export",
            NamedHandlerCast::new(to_export_handler),
            OnConflict::Replace,
        )
        .unwrap();

    let still = logging.get_named_handler("export").unwrap().unwrap();
    assert!(same_handler(&attached, &still));
}

#[test]
fn custom_cast_receives_context_theme() {
    let logging = Logging::new();
    let seen = SharedBuffer::new();
    let sink = seen.clone();
    let cast = NamedHandlerCast::new(
        move |value: HandlerValue, ctx: &CastContext<'_>| -> Result<Option<HandlerRef>, Error> {
            if value.is_off() {
                return Ok(None);
            }
            assert!(!ctx.theme.get("log.name").is_plain());
            Ok(Some(Arc::new(ExportHandler::new(Stream::from(sink.clone())))))
        },
    );
    logging
        .register_named_handler("audit", cast, OnConflict::Raise)
        .unwrap();
    logging.set_named_handler("audit", true).unwrap();
    logging.set_level("root", Level::Info);
    logging.get_logger("app").warning("audited", ());

    assert!(seen.contents().contains("audited"));
    logging.set_named_handler("audit", HandlerValue::Off).unwrap();
    assert_eq!(logging.tree().handler_count(), 0);
}

#[test]
fn casts_accept_json_values() {
    let logging = Logging::new();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.jsonl");

    logging
        .set_named_handler(
            "export",
            serde_json::json!({ "filename": path.to_str().unwrap(), "level": "error" }),
        )
        .unwrap();
    logging
        .set_named_handler("console", serde_json::json!("stdout"))
        .unwrap();
    assert_eq!(logging.tree().handler_count(), 2);

    assert!(matches!(
        logging.set_named_handler("console", serde_json::json!([1, 2])),
        Err(Error::Cast { .. })
    ));
}

#[test]
fn cast_functions_are_usable_directly() {
    let theme = splatlog::Theme::default();
    let ctx = CastContext { theme: &theme };
    assert!(to_export_handler(HandlerValue::Off, &ctx).unwrap().is_none());
    assert!(
        to_export_handler(Stream::from(SharedBuffer::new()).into(), &ctx)
            .unwrap()
            .is_some()
    );
}

#[test]
fn concurrent_sets_never_double_attach() {
    let logging = Logging::new();
    let workers: Vec<_> = (0..8)
        .map(|_| {
            let logging = Arc::clone(&logging);
            thread::spawn(move || {
                for _ in 0..50 {
                    logging
                        .set_named_handler("export", Stream::from(SharedBuffer::new()))
                        .unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(logging.tree().handler_count(), 1);
    let current = logging.get_named_handler("export").unwrap().unwrap();
    assert!(logging.tree().contains_handler(&current));
}

#[test]
fn readers_always_see_exactly_one_handler_during_replacement() {
    let logging = Logging::new();
    logging
        .set_named_handler("export", Stream::from(SharedBuffer::new()))
        .unwrap();
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let logging = Arc::clone(&logging);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut observations = 0_usize;
                loop {
                    assert_eq!(logging.tree().handler_count(), 1);
                    assert_eq!(logging.tree().handlers().len(), 1);
                    observations += 1;
                    if done.load(Ordering::Acquire) {
                        break;
                    }
                }
                observations
            })
        })
        .collect();

    let writers: Vec<_> = (0..4)
        .map(|_| {
            let logging = Arc::clone(&logging);
            thread::spawn(move || {
                for _ in 0..200 {
                    logging
                        .set_named_handler("export", Stream::from(SharedBuffer::new()))
                        .unwrap();
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        assert!(reader.join().unwrap() > 0);
    }
    assert_eq!(logging.tree().handler_count(), 1);
}
