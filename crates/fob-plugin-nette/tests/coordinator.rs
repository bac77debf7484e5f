//! Coordinator behaviour driven through fake listeners and interrupts.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use fob_config::{HostSetting, ResolvedConfig, SharedConfig, UserConfig};
use fob_dev::testing::{FakeInterrupts, FakeListener, RecordingTerminator};
use fob_dev::{ListenerEvent, ServerListener};
use fob_plugin_nette::{CoordinatorState, DevServerCoordinator, InfoFile, NetteError, NetteOptions};
use tempfile::TempDir;

struct Fixture {
    _temp: TempDir,
    config: SharedConfig,
    coordinator: DevServerCoordinator,
    listener: Arc<FakeListener>,
    interrupts: FakeInterrupts,
    terminator: Arc<RecordingTerminator>,
}

impl Fixture {
    fn new(options: NetteOptions, configure: impl FnOnce(&mut UserConfig)) -> Self {
        let temp = TempDir::new().unwrap();
        let mut user = UserConfig::default();
        user.build.out_dir = Some(temp.path().join("www/assets"));
        configure(&mut user);

        let config = SharedConfig::new(ResolvedConfig::resolve(&user, temp.path()));
        let terminator = RecordingTerminator::new();
        let coordinator = DevServerCoordinator::new(options, config.clone(), terminator.clone());

        let listener = FakeListener::new();
        let interrupts = FakeInterrupts::new();
        coordinator.attach(listener.clone(), &interrupts).unwrap();

        Self {
            _temp: temp,
            config,
            coordinator,
            listener,
            interrupts,
            terminator,
        }
    }

    fn info_file(&self) -> Option<InfoFile> {
        let path = self.coordinator.info_file_path();
        path.exists().then(|| InfoFile::read(&path).unwrap())
    }
}

fn addr(port: u16) -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], port))
}

#[test]
fn test_localhost_http_default_port() {
    let fixture = Fixture::new(NetteOptions::default(), |_| {});

    fixture.listener.start(addr(5173)).unwrap();

    let info = fixture.info_file().expect("info file written");
    assert_eq!(info.dev_server, "http://localhost:5173");
    assert_eq!(
        fixture.coordinator.state(),
        CoordinatorState::Active {
            url: "http://localhost:5173".to_string()
        }
    );

    let raw = std::fs::read_to_string(fixture.coordinator.info_file_path()).unwrap();
    assert_eq!(raw, "{\n\t\"devServer\": \"http://localhost:5173\"\n}");
}

#[test]
fn test_named_host_with_https() {
    let fixture = Fixture::new(NetteOptions::default(), |user| {
        user.server.host = Some(HostSetting::from("example.com"));
        user.server.https = Some(true);
    });

    fixture.listener.start(addr(3000)).unwrap();

    assert_eq!(fixture.info_file().unwrap().dev_server, "https://example.com:3000");
}

#[test]
fn test_host_override_with_all_interfaces() {
    let fixture = Fixture::new(NetteOptions::new().with_host("192.168.1.200"), |user| {
        user.server.host = Some(HostSetting::Flag(true));
    });

    fixture.listener.start(addr(5173)).unwrap();

    assert_eq!(fixture.info_file().unwrap().dev_server, "http://192.168.1.200:5173");
}

#[test]
fn test_all_interfaces_is_advertised_as_localhost() {
    let fixture = Fixture::new(NetteOptions::default(), |user| {
        user.server.host = Some(HostSetting::from("0.0.0.0"));
    });

    fixture.listener.start(addr(8080)).unwrap();

    assert_eq!(fixture.info_file().unwrap().dev_server, "http://localhost:8080");
}

#[test]
fn test_all_interfaces_override_is_advertised_as_localhost() {
    let fixture = Fixture::new(NetteOptions::new().with_host("0.0.0.0"), |_| {});

    fixture.listener.start(SocketAddr::from(([0, 0, 0, 0], 5173))).unwrap();

    assert_eq!(fixture.info_file().unwrap().dev_server, "http://localhost:5173");
    assert_eq!(fixture.config.origin(), "http://localhost:5173");
}

#[test]
fn test_all_interfaces_override_wins_over_named_host() {
    let fixture = Fixture::new(NetteOptions::new().with_host("0.0.0.0"), |user| {
        user.server.host = Some(HostSetting::from("example.com"));
        user.server.https = Some(true);
    });

    fixture.listener.start(addr(5173)).unwrap();

    assert_eq!(fixture.info_file().unwrap().dev_server, "https://localhost:5173");
}

#[test]
fn test_port_80_is_omitted() {
    let fixture = Fixture::new(NetteOptions::default(), |_| {});

    fixture.listener.start(addr(80)).unwrap();

    assert_eq!(fixture.info_file().unwrap().dev_server, "http://localhost");
}

#[test]
fn test_origin_matches_info_file() {
    let fixture = Fixture::new(NetteOptions::default(), |_| {});
    assert_eq!(fixture.config.origin(), "");

    fixture.listener.start(addr(5173)).unwrap();

    assert_eq!(fixture.config.origin(), fixture.info_file().unwrap().dev_server);
}

#[test]
fn test_close_removes_info_file() {
    let fixture = Fixture::new(NetteOptions::default(), |_| {});

    fixture.listener.start(addr(5173)).unwrap();
    assert!(fixture.info_file().is_some());

    fixture.listener.stop().unwrap();
    assert!(fixture.info_file().is_none());
    assert_eq!(fixture.coordinator.state(), CoordinatorState::Terminated);
}

#[test]
fn test_close_without_listening_is_noop() {
    let fixture = Fixture::new(NetteOptions::default(), |_| {});

    fixture.listener.stop().unwrap();

    assert!(fixture.info_file().is_none());
    assert_eq!(fixture.coordinator.state(), CoordinatorState::Idle);
}

#[test]
fn test_repeated_listen_close_cycles() {
    let fixture = Fixture::new(NetteOptions::default(), |_| {});

    for port in [5173, 5174, 5175] {
        fixture.listener.start(addr(port)).unwrap();
        assert_eq!(
            fixture.info_file().unwrap().dev_server,
            format!("http://localhost:{port}")
        );
        assert_eq!(fixture.config.origin(), format!("http://localhost:{port}"));

        fixture.listener.stop().unwrap();
        assert!(fixture.info_file().is_none());
    }
}

#[test]
fn test_nested_info_file_path() {
    let fixture = Fixture::new(NetteOptions::new().with_info_file_path("a/b/c/info.json"), |_| {});
    assert!(fixture.coordinator.info_file_path().ends_with("www/assets/a/b/c/info.json"));

    fixture.listener.start(addr(5173)).unwrap();

    assert_eq!(fixture.info_file().unwrap().dev_server, "http://localhost:5173");
}

#[test]
fn test_interrupt_closes_then_exits() {
    let fixture = Fixture::new(NetteOptions::default(), |_| {});
    fixture.listener.start(addr(5173)).unwrap();

    fixture.interrupts.trigger().unwrap();

    assert_eq!(fixture.listener.close_requests(), 1);
    assert!(fixture.listener.local_addr().is_none());
    assert!(fixture.info_file().is_none());
    assert_eq!(fixture.terminator.codes(), vec![0]);
}

#[test]
fn test_interrupt_while_idle_exits() {
    let fixture = Fixture::new(NetteOptions::default(), |_| {});

    fixture.interrupts.trigger().unwrap();

    assert!(fixture.info_file().is_none());
    assert_eq!(fixture.terminator.codes(), vec![0]);
}

#[test]
fn test_reattach_keeps_single_interrupt_subscription() {
    let fixture = Fixture::new(NetteOptions::default(), |_| {});
    let second = FakeListener::new();

    fixture.coordinator.attach(second.clone(), &fixture.interrupts).unwrap();

    assert_eq!(fixture.interrupts.subscriber_count(), 1);
    assert_eq!(fixture.listener.handler_count(ListenerEvent::Listening), 0);
    assert_eq!(second.handler_count(ListenerEvent::Listening), 1);
    assert_eq!(second.handler_count(ListenerEvent::Close), 1);

    second.start(addr(5180)).unwrap();
    assert_eq!(fixture.info_file().unwrap().dev_server, "http://localhost:5180");

    fixture.interrupts.trigger().unwrap();
    assert_eq!(fixture.listener.close_requests(), 0);
    assert_eq!(second.close_requests(), 1);
    assert!(fixture.info_file().is_none());
    assert_eq!(fixture.terminator.codes(), vec![0]);
}

#[test]
fn test_write_failure_propagates_from_listening() {
    let fixture = Fixture::new(NetteOptions::new().with_info_file_path("blocked/nette.json"), |_| {});
    let out_dir = fixture.config.read().build.out_dir.clone();
    std::fs::create_dir_all(&out_dir).unwrap();
    std::fs::write(out_dir.join("blocked"), "not a directory").unwrap();

    let err = fixture.listener.start(addr(5173)).unwrap_err();

    let nette = err.downcast_ref::<NetteError>().expect("NetteError");
    assert!(matches!(nette, NetteError::Io { path, .. } if path == &out_dir.join("blocked")));
    assert_eq!(fixture.coordinator.state(), CoordinatorState::Idle);
    assert_eq!(fixture.config.origin(), "");
}

#[test]
fn test_dropping_coordinator_stops_reacting() {
    let temp = TempDir::new().unwrap();
    let mut user = UserConfig::default();
    user.build.out_dir = Some(temp.path().to_path_buf());
    let config = SharedConfig::new(ResolvedConfig::resolve(&user, temp.path()));
    let listener = FakeListener::new();
    let interrupts = FakeInterrupts::new();

    let coordinator = DevServerCoordinator::new(NetteOptions::default(), config, RecordingTerminator::new());
    coordinator.attach(listener.clone(), &interrupts).unwrap();
    let path = coordinator.info_file_path();
    drop(coordinator);

    listener.start(addr(5173)).unwrap();
    assert!(!Path::new(&path).exists());
    assert_eq!(interrupts.subscriber_count(), 0);
}
