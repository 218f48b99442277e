//! Route table and OpenAPI document.
//!
//! Every resource group under `/api` gets the generic `get`/`create`/`update`/`delete`
//! routes for its collection. Groups with business rules replace some of them and add
//! their named endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::{
        api::{ErrorDto, GetParamsDto, UpdateDocumentDto},
        calendar::FilterCriteriaDto,
        client::{AddNotificationDto, RewardSummaryDto},
        membership::{ApplyChargeDto, CreateMembershipDto, MembershipDto, PaymentDto},
        session::{CancellationDto, EnrollmentDto, PromotionDto, SessionClientDto},
    },
    server::{
        controller::{calendar, client, crud, membership, reservation, room, session},
        model::{
            calendar::Calendar,
            catalog::{Instructor, Room, Service, User},
            client::Client,
            document::DocumentModel,
            membership::{Membership, MembershipOffer, Payment},
            reservation::Reservation,
            session::GymSession,
        },
        state::AppState,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Gym Manager API"),
    paths(
        session::get_completed,
        session::add_to_calendar,
        session::get_clients_by_session,
        session::enqueue_waiting_list,
        session::withdraw_waiting_list,
        session::enroll,
        calendar::get_by_room,
        calendar::publish,
        calendar::get_filter,
        reservation::get_by_client,
        reservation::create_reservation,
        reservation::update_reservation,
        reservation::cancel_reservation,
        membership::create_membership,
        membership::has_active_membership,
        membership::is_defaulter,
        membership::its_allowed_to_reserve,
        membership::apply_charge,
        client::get_one,
        client::get_completed,
        client::add_favorite_service,
        client::delete_favorite_service,
        client::get_favorites_services,
        client::add_notification,
        client::delete_notification,
        client::check_stars,
        room::give_client_reward,
    ),
    components(schemas(
        ErrorDto,
        GetParamsDto,
        UpdateDocumentDto,
        FilterCriteriaDto,
        AddNotificationDto,
        RewardSummaryDto,
        ApplyChargeDto,
        CreateMembershipDto,
        MembershipDto,
        PaymentDto,
        CancellationDto,
        EnrollmentDto,
        PromotionDto,
        SessionClientDto,
    )),
    tags(
        (name = "sessions", description = "Enrollment and waiting lists"),
        (name = "calendar", description = "Room calendars"),
        (name = "reservation", description = "Reservations"),
        (name = "membership", description = "Memberships and payments"),
        (name = "client", description = "Clients, favorites and rewards"),
        (name = "rooms", description = "Rooms"),
    )
)]
pub struct ApiDoc;

/// Generic document routes for one collection.
fn resource<M: DocumentModel>() -> Router<AppState> {
    Router::new()
        .route("/get", post(crud::get::<M>))
        .route("/create", post(crud::create::<M>))
        .route("/update", put(crud::update::<M>))
        .route("/delete", delete(crud::delete::<M>))
}

pub fn router() -> Router<AppState> {
    let sessions = Router::new()
        .route("/get", post(crud::get::<GymSession>))
        .route("/create", post(session::create_session))
        .route("/update", put(session::update_session))
        .route("/delete", delete(session::delete_session))
        .route("/getCompleted", post(session::get_completed))
        .route("/calendar", put(session::add_to_calendar))
        .route("/addSessionToCalendar", put(session::add_to_calendar))
        .route("/getClientsBySession", get(session::get_clients_by_session))
        .route("/enqueueWaitingList", post(session::enqueue_waiting_list))
        .route("/withdrawWaitingList", delete(session::withdraw_waiting_list))
        .route("/enroll", post(session::enroll));

    let calendars = resource::<Calendar>()
        .route("/getByRoom", get(calendar::get_by_room))
        .route("/publish", put(calendar::publish))
        .route("/getFilter", post(calendar::get_filter));

    let reservations = Router::new()
        .route("/get", post(crud::get::<Reservation>))
        .route("/create", post(reservation::create_reservation))
        .route("/update", put(reservation::update_reservation))
        .route("/delete", delete(reservation::cancel_reservation))
        .route("/getByClient", get(reservation::get_by_client))
        .route("/cancel", delete(reservation::cancel_reservation));

    let memberships = Router::new()
        .route("/get", post(crud::get::<Membership>))
        .route("/create", post(membership::create_membership))
        .route("/update", put(crud::update::<Membership>))
        .route("/delete", delete(crud::delete::<Membership>))
        .route("/hasActiveMembership", get(membership::has_active_membership))
        .route("/isDefaulter", get(membership::is_defaulter))
        .route("/itsAllowedToReserve", get(membership::its_allowed_to_reserve))
        .route("/applyCharge", post(membership::apply_charge));

    let clients = resource::<Client>()
        .route("/getOne", get(client::get_one))
        .route("/getCompleted", post(client::get_completed))
        .route("/addFavoriteService", put(client::add_favorite_service))
        .route("/deleteFavoriteService", delete(client::delete_favorite_service))
        .route("/getFavoritesServices", get(client::get_favorites_services))
        .route("/addNotification", post(client::add_notification))
        .route("/deleteNotification", delete(client::delete_notification))
        .route("/checkStars", get(client::check_stars));

    let rooms = resource::<Room>().route("/giveClientReward", get(room::give_client_reward));

    let api = Router::new()
        .nest("/sessions", sessions)
        .nest("/services", resource::<Service>())
        .nest("/users", resource::<User>())
        .nest("/rooms", rooms)
        .nest("/instructor", resource::<Instructor>())
        .nest("/calendar", calendars)
        .nest("/reservation", reservations)
        .nest("/membership", memberships)
        .nest("/membershipoffer", resource::<MembershipOffer>())
        .nest("/payment", resource::<Payment>())
        .nest("/client", clients);

    Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
