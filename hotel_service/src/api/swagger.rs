use models_hotel::{guest, occupation, room, user};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Occupations
        crate::api::occupations::create::create_occupation,
        crate::api::occupations::list::list_occupations,
        crate::api::occupations::get::get_occupation,
        crate::api::occupations::update::update_occupation,
        crate::api::occupations::delete::delete_occupation,
        // Guests
        crate::api::guests::create::create_guest,
        crate::api::guests::get::get_guest,
        // Rooms
        crate::api::rooms::list::list_rooms,
        crate::api::rooms::get::get_room,
        // Users
        crate::api::users::create::create_user,
    ),
    components(
        schemas(
            occupation::Occupation,
            occupation::OccupationGuest,
            occupation::CreateOccupationRequest,
            occupation::CreateOccupationGuestRequest,
            occupation::UpdateOccupationRequest,
            occupation::StayType,
            occupation::OccupationStatus,
            guest::Guest,
            guest::GuestSummary,
            guest::CreateGuestRequest,
            guest::DocumentType,
            room::Room,
            room::RoomSummary,
            room::RoomType,
            user::User,
            user::CreateUserRequest,
            user::UserRole,
            model_response::ErrorDetails,
        )
    ),
    tags(
        (name = "hotel service", description = "Hotel operations admin API")
    )
)]
pub struct ApiDoc;
