//! End-to-end service workflow: three pools, two clients, one shop

use std::cell::RefCell;
use std::rc::Rc;

use aqua::calc::{
    DoseStrategy, InventoryService, KitOutcome, PoolService, QualityScorer, Regimen, StockObserver,
};
use aqua::model::{
    Client, Pool, PoolError, Product, ProductType, Readings, StockEvent, StockLedger, StockOrigin,
};
use aqua::logging;
use aqua::store::{JsonFileStore, RecordLocation, RecordStore};
use proptest::prelude::*;
use rstest::rstest;

#[derive(Clone, Default)]
struct Alerts(Rc<RefCell<Vec<StockEvent>>>);

impl StockObserver for Alerts {
    fn on_stock_event(&self, event: &StockEvent) -> aqua::Result<()> {
        self.0.borrow_mut().push(event.clone());
        Ok(())
    }
}

fn home_stock(each: f64) -> StockLedger {
    ProductType::ALL
        .iter()
        .fold(StockLedger::new(), |ledger, t| ledger.with_quantity(t.label(), each))
}

fn service() -> PoolService {
    let mut service = PoolService::default();
    service.register_client(
        Client::new("111", "Laura", "San Martin 123").with_stock(home_stock(50.0)),
    );
    service.register_client(Client::new("222", "Diego", "Belgrano 456").with_stock(home_stock(10.0)));

    service.register_pool(
        Pool::new("P-CHICA", 12_000, "111").with_readings(Readings::new(7.6, 15.0, 0.2).unwrap()),
    );
    service.register_pool(
        Pool::new("P-MED", 25_000, "111").with_readings(Readings::new(7.1, 35.0, 0.6).unwrap()),
    );
    service.register_pool(
        Pool::new("P-GRANDE", 45_000, "222").with_readings(Readings::new(7.5, 12.0, 0.0).unwrap()),
    );
    service
}

fn shop() -> InventoryService {
    let mut shop = InventoryService::default();
    let catalog = [
        ("cloro-granulado", "CL-GR-1", "Cloro Granulado Premium", 10.0),
        ("cloro-pastilla", "CL-PA-2", "Cloro en Pastillas", 5.0),
        ("clarificador", "CL-AR-3", "Clarificador Cristal", 3.0),
        ("alguicida", "AL-GI-4", "Alguicida Total", 2.0),
        ("antisarro", "AN-TI-5", "Antisarro Plus", 4.0),
    ];
    for (type_label, sku, name, quantity) in catalog {
        let product = Product::from_catalog(type_label, sku, name, "").unwrap();
        shop.register_product(product, quantity);
    }
    shop
}

#[rstest]
#[case::small_pool_covered("P-CHICA", Regimen::Maintenance, 100.0, false, "{}")]
#[case::medium_pool_shock(
    "P-MED",
    Regimen::Shock,
    0.0,
    true,
    "{cloro-granulado: 250, clarificador: 150, alguicida: 12.5}"
)]
#[case::large_pool_short(
    "P-GRANDE",
    Regimen::Maintenance,
    100.0,
    true,
    "{cloro-granulado: 125, clarificador: 170}"
)]
fn test_visit_decisions(
    #[case] pool_id: &str,
    #[case] regimen: Regimen,
    #[case] score: f64,
    #[case] expected: bool,
    #[case] shortfall: &str,
) {
    logging::init_test();
    let mut service = service();
    let strategy = service.strategy(regimen);

    let (visit, required) = service.evaluate_visit(pool_id, regimen.label(), &strategy).unwrap();

    assert_eq!(required, expected);
    assert_eq!(visit.reason, regimen.label());
    assert_eq!(
        visit.observation,
        format!("Water quality {score:.1}%. Shortfall: {shortfall}")
    );
}

#[test]
fn test_visit_kit_and_alerts() {
    logging::init_test();
    let mut service = service();
    let mut shop = shop();

    let shop_alerts = Alerts::default();
    let client_alerts = Alerts::default();
    shop.subscribe(Box::new(shop_alerts.clone()));
    service.subscribe(Box::new(client_alerts.clone()));

    let strategy = service.strategy(Regimen::Shock);
    let (visit, required) = service.evaluate_visit("P-MED", "choque", &strategy).unwrap();
    assert!(required);

    // One unit of each chemical the shock dose calls for
    let plan = strategy.required_doses(service.pool("P-MED").unwrap());
    let kit = shop.prepare_kit(&plan, 1.0).unwrap();
    assert!(kit.is_complete());
    assert_eq!(kit.deducted().count(), 3);
    assert_eq!(shop.available("CL-GR-1").unwrap(), 9.0);
    assert_eq!(shop.available("clarificador").unwrap(), 2.0);
    assert_eq!(shop.available("AL-GI-4").unwrap(), 1.0);

    // Clarifier and algaecide reached the shop minimum
    let keys: Vec<_> = shop_alerts.0.borrow().iter().map(|e| e.key.clone()).collect();
    assert_eq!(keys, vec!["CL-AR-3", "AL-GI-4"]);
    assert!(shop_alerts.0.borrow().iter().all(|e| e.origin == StockOrigin::Local));

    // A second kit runs out of algaecide only
    let kit = shop.prepare_kit(&plan, 1.0).unwrap();
    assert!(kit.is_complete());
    let kit = shop.prepare_kit(&plan, 1.0).unwrap();
    let algaecide = kit
        .lines
        .iter()
        .find(|l| l.product_type == ProductType::Algaecide)
        .unwrap();
    assert_eq!(
        algaecide.outcome,
        KitOutcome::Short {
            available: 0.0,
            requested: 1.0
        }
    );
    assert!(!kit.is_complete());

    // The visit happens and the client uses some of their own algaecide
    service.complete_visit(visit.id).unwrap();
    let remaining = service
        .consume_client_stock("111", ProductType::Algaecide, 49.5)
        .unwrap();
    assert_eq!(remaining, 0.5);

    let client_alerts = client_alerts.0.borrow();
    assert_eq!(client_alerts.len(), 1);
    assert_eq!(client_alerts[0].origin.to_string(), "cliente:111");
    assert_eq!(client_alerts[0].key, "alguicida");
}

#[test]
fn test_snapshot_to_disk() {
    logging::init_test();
    let mut service = service();
    for pool_id in ["P-CHICA", "P-MED", "P-GRANDE"] {
        service
            .evaluate_visit(pool_id, "mantenimiento", &Regimen::Maintenance)
            .unwrap();
    }
    let first = service.visits()[0].id;
    service.complete_visit(first).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path());
    let record = service.snapshot().unwrap();
    let location = store.save("summary", &record).unwrap();
    assert_eq!(location, RecordLocation::File(dir.path().join("summary.json")));

    let loaded = store.load("summary").unwrap();
    assert_eq!(loaded.description, "summary");
    assert_eq!(loaded.data["visits"], record.data["visits"]);

    let visits = loaded.data["visits"].as_array().unwrap();
    assert_eq!(visits.len(), 3);
    assert_eq!(visits[0]["completed"], true);
    assert_eq!(visits[1]["pool_id"], "P-MED");

    let pools: Vec<_> = loaded.data["pools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(pools, vec!["P-CHICA", "P-GRANDE", "P-MED"]);
}

#[test]
fn test_unknown_catalog_type_rejected() {
    assert!(matches!(
        Product::from_catalog("cloro-liquido", "CL-LQ-9", "Cloro Liquido", ""),
        Err(PoolError::UnknownProductType(_))
    ));
}

proptest! {
    #[test]
    fn prop_visit_required_iff_low_score_or_shortfall(
        ph in 6.5f64..8.5,
        turbidity in 0.0f64..60.0,
        algae in 0.0f64..=1.0,
        chlorine in 0.0f64..200.0,
        clarifier in 0.0f64..200.0,
        volume in 1_000u32..60_000,
    ) {
        let home = StockLedger::new()
            .with_quantity("cloro-granulado", chlorine)
            .with_quantity("clarificador", clarifier);
        let readings = Readings::new(ph, turbidity, algae).unwrap();

        let mut service = PoolService::default();
        service.register_client(Client::new("111", "Laura", "").with_stock(home.clone()));
        service.register_pool(Pool::new("P-X", volume, "111").with_readings(readings));

        let (_, required) = service
            .evaluate_visit("P-X", "mantenimiento", &Regimen::Maintenance)
            .unwrap();

        let score = QualityScorer::default().score(&readings);
        let plan = Regimen::Maintenance.required_doses(service.pool("P-X").unwrap());
        let short = plan
            .iter()
            .any(|(t, required)| home.available(t.label()) < *required);

        prop_assert_eq!(required, score < 70.0 || short);
    }
}
