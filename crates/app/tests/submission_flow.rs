//! Integration tests for composing and submitting a booking against a mocked backend.

use std::sync::Arc;

use decimal_percentage::Percentage;
use jiff::{SignedDuration, Timestamp};
use rust_decimal::Decimal;
use rusty_money::{Money, iso::VND};
use testresult::TestResult;

use encore::{
    add_ons::{AddOn, AddOnId},
    composer::BookingComposer,
    discounts::PromotionDiscount,
    drafts::{BookingDraft, TimeWindow},
    offerings::{Offering, OfferingId, OfferingKind},
    pricing::{self, PromotionOutcome},
    promotions::{PromotionCode, PromotionId, ValidityWindow},
};
use encore_app::{
    api::{BookingApi, MockBookingApi},
    bookings::{BookingId, BookingList, BookingResult, BookingStatus},
    coordinator::{SubmissionCoordinator, SubmissionOutcome},
    lists::{load_bookings, load_catalog},
    session::{Role, SessionContext, UserId},
};

const NOW: Timestamp = Timestamp::constant(1_793_534_400, 0);

fn room() -> Offering<'static> {
    Offering::new(
        OfferingId::new("vip-1"),
        OfferingKind::Room,
        "VIP 1",
        Money::from_minor(500_000, VND),
        12,
    )
}

fn add_ons() -> Vec<AddOn<'static>> {
    vec![
        AddOn::new(
            AddOnId::new("fruit"),
            "Fruit platter",
            Money::from_minor(150_000, VND),
        ),
        AddOn::new(
            AddOnId::new("cake"),
            "Birthday cake",
            Money::from_minor(200_000, VND),
        ),
    ]
}

fn ten_percent(minimum_order: i64) -> PromotionCode<'static> {
    PromotionCode::new(
        PromotionId::new("p-10"),
        "KARAOKE10",
        PromotionDiscount::PercentageOff(Percentage::from(Decimal::new(10, 2))),
        Money::from_minor(minimum_order, VND),
        ValidityWindow::always(),
    )
}

fn session() -> SessionContext {
    SessionContext::new(
        UserId::new("u-7"),
        "Minh",
        Role::Customer,
        "secret".to_string(),
    )
}

fn confirmed(id: &str, total: i64) -> BookingResult {
    BookingResult {
        id: BookingId::new(id),
        offering: OfferingId::new("vip-1"),
        window: None,
        status: BookingStatus::Confirmed,
        total: Money::from_minor(total, VND),
    }
}

/// One hour in VIP 1 for six guests with both add-ons, validated against
/// the backend's answer for the promotion code.
async fn compose_from_backend(api: &dyn BookingApi) -> TestResult<BookingDraft<'static>> {
    let catalog = load_catalog(api).await?;
    let start = NOW + SignedDuration::from_hours(6);
    let mut draft = BookingDraft::new(VND);

    draft.select_offering(
        catalog
            .offering(&OfferingId::new("vip-1"))
            .ok_or_else(|| std::io::Error::other("vip-1 missing from catalog"))?
            .clone(),
    )?;
    draft.set_quantity(6);
    draft.set_window(TimeWindow::new(start, start + SignedDuration::from_hours(1)));

    for add_on in catalog.add_ons() {
        draft.add_add_on(add_on.clone())?;
    }

    let subtotal = pricing::subtotal(&draft)?;

    if let Some(promotion) = api.validate_promotion("KARAOKE10", subtotal, NOW).await? {
        draft.apply_promotion(promotion)?;
    }

    Ok(draft)
}

fn catalog_backend(minimum_order: i64) -> MockBookingApi {
    let mut api = MockBookingApi::new();

    api.expect_fetch_offerings().returning(|| Ok(vec![room()]));
    api.expect_fetch_add_ons().returning(|| Ok(add_ons()));
    api.expect_validate_promotion()
        .withf(|code, subtotal, _| code == "KARAOKE10" && subtotal.to_minor_units() == 850_000)
        .returning(move |_, _, _| Ok(Some(ten_percent(minimum_order))));

    api
}

#[tokio::test]
async fn applied_promotion_is_sent_with_the_booking() -> TestResult {
    let mut api = catalog_backend(500_000);

    api.expect_fetch_bookings()
        .returning(|| Ok(vec![confirmed("b-1", 300_000)]));
    api.expect_create_booking()
        .once()
        .withf(|request| {
            request.promotion_code.as_deref() == Some("KARAOKE10")
                && request.add_on_ids == ["fruit", "cake"]
                && request.quantity == 6
        })
        .returning(|_| Ok(confirmed("b-2", 765_000)));

    let api: Arc<dyn BookingApi> = Arc::new(api);
    let draft = compose_from_backend(api.as_ref()).await?;

    let composition = BookingComposer::compose(&draft, NOW);

    assert_eq!(composition.summary().subtotal().to_minor_units(), 850_000);
    assert_eq!(composition.summary().discount().to_minor_units(), 85_000);
    assert_eq!(composition.summary().total().to_minor_units(), 765_000);

    let bookings = load_bookings(api.as_ref()).await?;
    let coordinator = SubmissionCoordinator::new(Arc::clone(&api), &session(), bookings);

    let outcome = coordinator.submit(&draft, NOW).await?;

    assert_eq!(outcome, SubmissionOutcome::Confirmed(confirmed("b-2", 765_000)));

    let ids: Vec<String> = coordinator
        .bookings()
        .iter()
        .map(|booking| booking.id.to_string())
        .collect();

    assert_eq!(ids, ["b-2", "b-1"]);

    Ok(())
}

#[tokio::test]
async fn promotion_below_minimum_is_a_notice_and_not_sent() -> TestResult {
    let mut api = catalog_backend(1_000_000);

    api.expect_create_booking()
        .once()
        .withf(|request| request.promotion_code.is_none())
        .returning(|_| Ok(confirmed("b-3", 850_000)));

    let api: Arc<dyn BookingApi> = Arc::new(api);
    let draft = compose_from_backend(api.as_ref()).await?;

    let composition = BookingComposer::compose(&draft, NOW);

    assert!(composition.can_submit());
    assert!(matches!(
        composition.promotion(),
        PromotionOutcome::NotApplicable { .. }
    ));
    assert_eq!(composition.summary().discount().to_minor_units(), 0);
    assert_eq!(composition.summary().total().to_minor_units(), 850_000);

    let coordinator = SubmissionCoordinator::new(api, &session(), BookingList::default());

    assert!(matches!(
        coordinator.submit(&draft, NOW).await?,
        SubmissionOutcome::Confirmed(_)
    ));

    Ok(())
}
