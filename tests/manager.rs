mod common;

use common::{dc, default_dc, init_tracing};
use lvmd_device_class::quantity::{SizeUnit, StripeSize};
use lvmd_device_class::{DEFAULT_SPARE_GB, DeviceClass, DeviceClassManager, LookupError, validate};

fn manager() -> DeviceClassManager {
    let classes = vec![
        DeviceClass { spare_gb: Some(50), ..dc("hdd1", "hdd1-vg") },
        DeviceClass { spare_gb: Some(100), ..dc("hdd2", "hdd2-vg") },
        default_dc("ssd", "ssd-vg"),
        DeviceClass {
            lvcreate_options: vec!["--mirrors=1".into(), "--nosync".into()],
            stripe: Some(2),
            stripe_size: "64K".into(),
            ..dc("mirrors", "hdd1-vg")
        },
    ];
    validate(&classes).unwrap();
    DeviceClassManager::new(classes, DEFAULT_SPARE_GB)
}

#[test]
fn lookup_by_name() -> Result<(), LookupError> {
    init_tracing();
    let manager = manager();

    let hdd1 = manager.device_class("hdd1")?;
    assert_eq!(hdd1.volume_group(), "hdd1-vg");
    assert_eq!(hdd1.spare_gb(), Some(50));
    assert_eq!(hdd1.spare(), 50 << 30);
    assert_eq!(hdd1.spare(), 53_687_091_200);

    let err = manager.device_class("unknown").unwrap_err();
    assert_eq!(err, LookupError::DeviceClassNotFound { name: "unknown".into() });
    assert!(err.is_not_found());
    Ok(())
}

#[test]
fn lookup_by_volume_group() -> Result<(), LookupError> {
    let manager = manager();

    let hdd2 = manager.find_device_class_by_vg_name("hdd2-vg")?;
    assert_eq!(hdd2.name(), "hdd2");
    assert_eq!(hdd2.spare(), 100 << 30);

    let err = manager.find_device_class_by_vg_name("unknown").unwrap_err();
    assert_eq!(err, LookupError::VolumeGroupNotFound { volume_group: "unknown".into() });
    assert!(err.is_not_found());
    Ok(())
}

#[test]
fn shared_volume_group_resolves_to_first_declared() -> Result<(), LookupError> {
    let manager = manager();
    assert_eq!(manager.find_device_class_by_vg_name("hdd1-vg")?.name(), "hdd1");

    let classes = vec![dc("b", "vg"), default_dc("a", "vg"), dc("c", "vg")];
    let manager = DeviceClassManager::new(classes, DEFAULT_SPARE_GB);
    assert_eq!(manager.find_device_class_by_vg_name("vg")?.name(), "b");
    Ok(())
}

#[test]
fn keeps_lvcreate_options_and_striping() -> Result<(), LookupError> {
    let manager = manager();
    let mirrors = manager.device_class("mirrors")?;
    assert_eq!(mirrors.lvcreate_options(), ["--mirrors=1", "--nosync"]);
    assert_eq!(mirrors.stripe(), Some(2));
    assert_eq!(mirrors.stripe_size(), Some(StripeSize { magnitude: 64, unit: Some(SizeUnit::Kilo) }));
    assert_eq!(mirrors.stripe_size().and_then(|s| s.bytes()), Some(64 << 10));

    let ssd = manager.device_class("ssd")?;
    assert!(ssd.lvcreate_options().is_empty());
    assert_eq!(ssd.stripe(), None);
    assert_eq!(ssd.stripe_size(), None);
    Ok(())
}

#[test]
fn default_class_uses_default_spare() {
    let manager = manager();
    let default = manager.default_device_class();
    assert_eq!(default.name(), "ssd");
    assert!(default.is_default());
    assert_eq!(default.spare_gb(), None);
    assert_eq!(default.spare(), DEFAULT_SPARE_GB << 30);

    let defaults: Vec<_> = manager.device_classes().filter(|dc| dc.is_default()).map(|dc| dc.name()).collect();
    assert_eq!(defaults, ["ssd"]);
}

#[test]
fn default_spare_is_injected() {
    let classes = vec![default_dc("ssd", "ssd-vg"), DeviceClass { spare_gb: Some(0), ..dc("hdd", "hdd-vg") }];
    let manager = DeviceClassManager::new(classes, 3);
    assert_eq!(manager.default_spare_gb(), 3);
    assert_eq!(manager.default_device_class().spare(), 3 << 30);
    // an explicit zero reserve is not replaced by the default
    assert_eq!(manager.device_class("hdd").unwrap().spare(), 0);
}

#[test]
fn iterates_in_declaration_order() {
    let manager = manager();
    assert_eq!(manager.len(), 4);
    assert!(!manager.is_empty());
    let names: Vec<_> = manager.device_classes().map(|dc| dc.name()).collect();
    assert_eq!(names, ["hdd1", "hdd2", "ssd", "mirrors"]);
    assert_eq!(manager.device_classes().nth(1).map(|dc| dc.raw().clone()), Some(DeviceClass { spare_gb: Some(100), ..dc("hdd2", "hdd2-vg") }));
}

#[test]
fn shared_between_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DeviceClassManager>();

    let manager = std::sync::Arc::new(manager());
    let handles: Vec<_> = (0..4).map(|_| {
        let manager = manager.clone();
        std::thread::spawn(move || {
            let spare = manager.device_class("hdd2").map(|dc| dc.spare());
            spare
        })
    }).collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Ok(100 << 30));
    }
}
