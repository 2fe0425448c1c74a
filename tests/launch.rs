use dingo_marketing::{
    cli::serve::{Args, LaunchError, LaunchOptions, LogLevel},
    config::Environment,
};
use proptest::{option, prelude::*, sample::select};

fn resolve(args: Args, pairs: &[(&str, &str)]) -> LaunchOptions {
    let env = Environment::from_pairs(pairs.iter().copied());
    LaunchOptions::resolve(&args, &env).unwrap()
}

#[test]
fn defaults_apply_without_flags_or_environment() {
    let options = resolve(Args::default(), &[]);
    assert_eq!(options.host, "127.0.0.1");
    assert_eq!(options.port, 8000);
    assert_eq!(options.log_level, LogLevel::Info);
    assert!(!options.debug);
    assert!(!options.reload);
}

#[test]
fn environment_beats_defaults() {
    let options = resolve(
        Args::default(),
        &[("HOST", "0.0.0.0"), ("PORT", "8080"), ("LOG_LEVEL", "WARNING")],
    );
    assert_eq!(options.host, "0.0.0.0");
    assert_eq!(options.port, 8080);
    assert_eq!(options.log_level, LogLevel::Warning);
}

#[test]
fn flags_beat_environment() {
    let args = Args {
        host: Some("10.0.0.5".into()),
        port: Some(9000),
        log_level: Some(LogLevel::Error),
        ..Args::default()
    };
    let options = resolve(
        args,
        &[("HOST", "0.0.0.0"), ("PORT", "8080"), ("LOG_LEVEL", "debug")],
    );
    assert_eq!(options.host, "10.0.0.5");
    assert_eq!(options.port, 9000);
    assert_eq!(options.log_level, LogLevel::Error);
}

#[test]
fn precedence_holds_per_parameter() {
    let args = Args {
        port: Some(7000),
        ..Args::default()
    };
    let options = resolve(args, &[("HOST", "example.internal")]);
    assert_eq!(options.host, "example.internal");
    assert_eq!(options.port, 7000);
    assert_eq!(options.log_level, LogLevel::Info);
}

#[test]
fn debug_from_environment_forces_reload() {
    let options = resolve(Args::default(), &[("DEBUG", "true")]);
    assert!(options.debug);
    assert!(options.reload);
}

#[test]
fn debug_flag_forces_reload() {
    let args = Args {
        debug: true,
        ..Args::default()
    };
    let options = resolve(args, &[("DEBUG", "false")]);
    assert!(options.debug);
    assert!(options.reload);
}

#[test]
fn reload_flag_alone_leaves_debug_off() {
    let args = Args {
        reload: true,
        ..Args::default()
    };
    let options = resolve(args, &[]);
    assert!(options.reload);
    assert!(!options.debug);
}

#[test]
fn warn_is_an_alias_for_warning() {
    let options = resolve(Args::default(), &[("LOG_LEVEL", "warn")]);
    assert_eq!(options.log_level, LogLevel::Warning);
    assert_eq!(options.log_level.directive(), "warn");
    assert_eq!(options.log_level.to_string(), "warning");
}

#[test]
fn invalid_environment_values_fail_startup() {
    let env = Environment::from_pairs([("PORT", "not-a-port")]);
    let err = LaunchOptions::resolve(&Args::default(), &env).unwrap_err();
    assert_eq!(
        err,
        LaunchError::InvalidEnv {
            key: "PORT",
            value: "not-a-port".into(),
            expected: "port number",
        }
    );

    let env = Environment::from_pairs([("LOG_LEVEL", "verbose")]);
    assert!(LaunchOptions::resolve(&Args::default(), &env).is_err());
}

#[test]
fn explicit_port_ignores_broken_environment_port() {
    let args = Args {
        port: Some(8123),
        ..Args::default()
    };
    let options = resolve(args, &[("PORT", "garbage")]);
    assert_eq!(options.port, 8123);
}

fn level() -> impl Strategy<Value = LogLevel> {
    select(vec![
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
    ])
}

fn env_level() -> impl Strategy<Value = (&'static str, LogLevel)> {
    select(vec![
        ("debug", LogLevel::Debug),
        ("INFO", LogLevel::Info),
        ("Warning", LogLevel::Warning),
        ("warn", LogLevel::Warning),
        ("ERROR", LogLevel::Error),
    ])
}

proptest! {
    #[test]
    fn every_parameter_resolves_flag_then_environment_then_default(
        host_flag in option::of("[a-z]{1,8}(\\.[a-z]{1,8})?"),
        host_env in option::of("[a-z]{1,8}(\\.[a-z]{1,8})?"),
        port_flag in option::of(any::<u16>()),
        port_env in option::of(any::<u16>()),
        level_flag in option::of(level()),
        level_env in option::of(env_level()),
        debug_flag in any::<bool>(),
        debug_env in option::of(any::<bool>()),
        reload_flag in any::<bool>(),
        reload_env in option::of(any::<bool>()),
    ) {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(host) = &host_env {
            pairs.push(("HOST", host.clone()));
        }
        if let Some(port) = port_env {
            pairs.push(("PORT", port.to_string()));
        }
        if let Some((raw, _)) = level_env {
            pairs.push(("LOG_LEVEL", raw.to_string()));
        }
        if let Some(debug) = debug_env {
            pairs.push(("DEBUG", debug.to_string()));
        }
        if let Some(reload) = reload_env {
            pairs.push(("RELOAD", reload.to_string()));
        }
        let env = Environment::from_pairs(pairs);
        let args = Args {
            host: host_flag.clone(),
            port: port_flag,
            reload: reload_flag,
            debug: debug_flag,
            log_level: level_flag,
        };

        let options = LaunchOptions::resolve(&args, &env).unwrap();

        let host = host_flag.or(host_env).unwrap_or_else(|| "127.0.0.1".to_string());
        let debug = debug_flag || debug_env.unwrap_or(false);
        prop_assert_eq!(options.host, host);
        prop_assert_eq!(options.port, port_flag.or(port_env).unwrap_or(8000));
        prop_assert_eq!(
            options.log_level,
            level_flag.or(level_env.map(|(_, level)| level)).unwrap_or(LogLevel::Info)
        );
        prop_assert_eq!(options.debug, debug);
        prop_assert_eq!(
            options.reload,
            reload_flag || debug || reload_env.unwrap_or(false)
        );
    }
}
