//! Repository behaviour against a throwaway sqlite database.

use market_common::models::{Booking, Category, Product, User, UserRole};
use market_db::repositories::{
    BookingRepository, CatalogRepository, ConfirmOutcome, UserRepository,
};
use market_db::{DbClient, SqlMarketRepositories};
use uuid::Uuid;

async fn test_repositories() -> SqlMarketRepositories {
    let path = std::env::temp_dir().join(format!("market-db-test-{}.db", Uuid::new_v4()));
    let url = format!("sqlite:{}", path.display());
    let client = DbClient::from_url(&url).await.expect("sqlite pool");
    let repos = SqlMarketRepositories::new(client);
    repos.init_schemas().await.expect("schema init");
    repos
}

fn buyer(email: &str) -> User {
    User {
        id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        name: "Test Buyer".to_string(),
        role: UserRole::Buyer,
        verified: false,
    }
}

fn unpaid_booking(email: &str) -> Booking {
    Booking {
        id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        product_id: "phone-1".to_string(),
        product_name: "Used Phone".to_string(),
        price: 5.0,
        paid: false,
        transaction_id: None,
    }
}

#[tokio::test]
async fn registration_is_insert_or_keep() {
    let repos = test_repositories().await;

    let first = buyer("alice@example.com");
    repos.users.upsert(first.clone()).await.unwrap();

    // Re-registering with a different role must not overwrite the stored
    // identity.
    let again = User {
        id: Uuid::new_v4().to_string(),
        role: UserRole::Admin,
        ..first.clone()
    };
    let stored = repos.users.upsert(again).await.unwrap();

    assert_eq!(stored.id, first.id);
    assert_eq!(stored.role, UserRole::Buyer);
}

#[tokio::test]
async fn find_by_email_is_explicit_about_absence() {
    let repos = test_repositories().await;

    assert!(repos
        .users
        .find_by_email("ghost@example.com")
        .await
        .unwrap()
        .is_none());

    repos.users.upsert(buyer("bob@example.com")).await.unwrap();
    let found = repos.users.find_by_email("bob@example.com").await.unwrap();
    assert_eq!(found.unwrap().email, "bob@example.com");

    // Email is a case-sensitive key.
    assert!(repos
        .users
        .find_by_email("Bob@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn verify_and_delete_report_whether_a_row_matched() {
    let repos = test_repositories().await;

    let seller = User {
        role: UserRole::Seller,
        ..buyer("seller@example.com")
    };
    repos.users.upsert(seller).await.unwrap();

    assert!(repos.users.set_verified("seller@example.com").await.unwrap());
    assert!(!repos.users.set_verified("ghost@example.com").await.unwrap());

    let stored = repos
        .users
        .find_by_email("seller@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(stored.verified);

    assert!(repos
        .users
        .delete_by_email("seller@example.com")
        .await
        .unwrap());
    assert!(!repos
        .users
        .delete_by_email("seller@example.com")
        .await
        .unwrap());
}

#[tokio::test]
async fn catalog_filters_products_by_category_and_seller() {
    let repos = test_repositories().await;

    repos
        .catalog
        .insert_category(Category {
            id: "phones".to_string(),
            name: "Phones".to_string(),
        })
        .await
        .unwrap();

    let product = |id: &str, category: &str, seller: &str| Product {
        id: id.to_string(),
        category_id: category.to_string(),
        seller_email: seller.to_string(),
        name: format!("Product {id}"),
        price: 10.0,
        description: None,
    };

    repos
        .catalog
        .insert_product(product("p1", "phones", "s1@example.com"))
        .await
        .unwrap();
    repos
        .catalog
        .insert_product(product("p2", "phones", "s2@example.com"))
        .await
        .unwrap();
    repos
        .catalog
        .insert_product(product("p3", "laptops", "s1@example.com"))
        .await
        .unwrap();

    let in_phones = repos.catalog.products_in_category("phones").await.unwrap();
    assert_eq!(in_phones.len(), 2);

    let by_s1 = repos
        .catalog
        .products_by_seller("s1@example.com")
        .await
        .unwrap();
    assert_eq!(by_s1.len(), 2);

    assert!(repos.catalog.delete_product("p1").await.unwrap());
    assert!(!repos.catalog.delete_product("p1").await.unwrap());
}

#[tokio::test]
async fn confirm_once_records_exactly_one_payment() {
    let repos = test_repositories().await;

    let booking = unpaid_booking("buyer@example.com");
    let booking_id = booking.id.clone();
    repos.bookings.insert_booking(booking).await.unwrap();

    let outcome = repos
        .bookings
        .confirm_paid(&booking_id, "txn_1", 500)
        .await
        .unwrap();
    let payment = match outcome {
        ConfirmOutcome::Confirmed(p) => p,
        other => panic!("expected Confirmed, got {other:?}"),
    };
    assert_eq!(payment.booking_id, booking_id);
    assert_eq!(payment.amount, 500);

    let stored = repos
        .bookings
        .find_by_id(&booking_id)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.paid);
    assert_eq!(stored.transaction_id.as_deref(), Some("txn_1"));

    let payments = repos
        .bookings
        .payments_for_booking(&booking_id)
        .await
        .unwrap();
    assert_eq!(payments.len(), 1);
}

#[tokio::test]
async fn second_confirm_loses_and_writes_nothing() {
    let repos = test_repositories().await;

    let booking = unpaid_booking("buyer@example.com");
    let booking_id = booking.id.clone();
    repos.bookings.insert_booking(booking).await.unwrap();

    let first = repos
        .bookings
        .confirm_paid(&booking_id, "txn_1", 500)
        .await
        .unwrap();
    assert!(matches!(first, ConfirmOutcome::Confirmed(_)));

    // A replayed confirmation (the losing side of a race) must not
    // double-write the payments collection or change the transaction id.
    let second = repos
        .bookings
        .confirm_paid(&booking_id, "txn_2", 500)
        .await
        .unwrap();
    assert!(matches!(second, ConfirmOutcome::AlreadyPaid));

    let stored = repos
        .bookings
        .find_by_id(&booking_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.transaction_id.as_deref(), Some("txn_1"));

    let payments = repos
        .bookings
        .payments_for_booking(&booking_id)
        .await
        .unwrap();
    assert_eq!(payments.len(), 1);
}

#[tokio::test]
async fn confirm_for_unknown_booking_is_not_found() {
    let repos = test_repositories().await;

    let outcome = repos
        .bookings
        .confirm_paid("missing-booking", "txn_1", 500)
        .await
        .unwrap();
    assert!(matches!(outcome, ConfirmOutcome::NotFound));

    // No orphan payment may be left behind.
    let payments = repos
        .bookings
        .payments_for_booking("missing-booking")
        .await
        .unwrap();
    assert!(payments.is_empty());
}
