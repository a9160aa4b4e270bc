//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for the actual scheduling logic.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    AppointmentDto, CancelAppointmentRequest, CreateAppointmentRequest, DayQuery,
    DayStatsResponse, DayViewResponse, HealthResponse, PatientAppointmentsResponse,
    SetStatusRequest, SetWindowRequest, SlotListResponse, SlotsQuery, WeekScheduleResponse,
    WindowDto,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{weekday_from_index, ActorId, AppointmentId, PatientId, ProviderId};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the ledger
/// backend is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let ledger_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        ledger: ledger_status,
    }))
}

// =============================================================================
// Appointments
// =============================================================================

/// POST /v1/appointments
///
/// Book an appointment. Runs the full validation gate and the atomic slot
/// reservation; returns the stored appointment with status `pending`.
pub async fn create_appointment(
    State(state): State<AppState>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentDto>), AppError> {
    let booking = request.to_new_appointment().map_err(AppError::BadRequest)?;

    let appointment = db_services::create_appointment(
        state.repository.as_ref(),
        state.notifier.as_ref(),
        booking,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(appointment.into())))
}

/// GET /v1/appointments/{id}
///
/// Fetch one appointment by id.
pub async fn get_appointment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<AppointmentDto> {
    let appointment =
        db_services::get_appointment(state.repository.as_ref(), AppointmentId::new(id)).await?;
    Ok(Json(appointment.into()))
}

/// POST /v1/appointments/{id}/cancel
///
/// Cancel an appointment on behalf of its patient or provider. Frees the
/// slot for rebooking.
pub async fn cancel_appointment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CancelAppointmentRequest>,
) -> HandlerResult<AppointmentDto> {
    let appointment = db_services::cancel_appointment(
        state.repository.as_ref(),
        state.notifier.as_ref(),
        AppointmentId::new(id),
        ActorId::new(request.acting_party_id),
    )
    .await?;

    Ok(Json(appointment.into()))
}

/// POST /v1/appointments/{id}/status
///
/// Move an appointment through its lifecycle. The transition table decides
/// which role may perform which move.
pub async fn set_appointment_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<SetStatusRequest>,
) -> HandlerResult<AppointmentDto> {
    let appointment = db_services::set_appointment_status(
        state.repository.as_ref(),
        state.notifier.as_ref(),
        AppointmentId::new(id),
        request.status,
        request.acting_role,
    )
    .await?;

    Ok(Json(appointment.into()))
}

/// GET /v1/appointments/stats?date=YYYY-MM-DD
///
/// Daily totals broken down by status, across all providers.
pub async fn get_daily_stats(
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> HandlerResult<DayStatsResponse> {
    let counts = db_services::daily_status_counts(state.repository.as_ref(), query.date).await?;
    Ok(Json(DayStatsResponse::new(query.date, counts)))
}

// =============================================================================
// Providers
// =============================================================================

/// GET /v1/providers/{id}/slots?date=YYYY-MM-DD&duration_minutes=30
///
/// List a provider's open slots for one date. Falls back to the configured
/// default slot length when no duration is given.
pub async fn list_provider_slots(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<SlotsQuery>,
) -> HandlerResult<SlotListResponse> {
    let duration = query.duration_minutes.unwrap_or(state.default_slot_minutes);

    let slots = db_services::list_available_slots(
        state.repository.as_ref(),
        ProviderId::new(id),
        query.date,
        duration,
    )
    .await?;

    let slots: Vec<String> = slots.into_iter().map(super::dto::format_time).collect();
    let total = slots.len();

    Ok(Json(SlotListResponse {
        provider_id: id,
        date: query.date,
        duration_minutes: duration,
        slots,
        total,
    }))
}

/// GET /v1/providers/{id}/appointments?date=YYYY-MM-DD
///
/// A provider's appointment sheet for one date, terminal statuses included.
pub async fn provider_day_view(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<DayQuery>,
) -> HandlerResult<DayViewResponse> {
    let appointments =
        db_services::provider_day_view(state.repository.as_ref(), ProviderId::new(id), query.date)
            .await?;

    let appointments: Vec<AppointmentDto> = appointments.into_iter().map(Into::into).collect();
    let total = appointments.len();

    Ok(Json(DayViewResponse {
        provider_id: id,
        date: query.date,
        appointments,
        total,
    }))
}

/// PUT /v1/providers/{id}/availability/{weekday}
///
/// Set one weekday's recurring window. Weekday is 0 (Monday) to 6 (Sunday).
pub async fn set_availability_window(
    State(state): State<AppState>,
    Path((id, weekday)): Path<(i64, u8)>,
    Json(request): Json<SetWindowRequest>,
) -> HandlerResult<WindowDto> {
    let weekday = weekday_from_index(weekday)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid weekday index: {}", weekday)))?;
    let window = request.to_window().map_err(AppError::BadRequest)?;

    db_services::set_availability_window(
        state.repository.as_ref(),
        ProviderId::new(id),
        weekday,
        window,
    )
    .await?;

    Ok(Json(WindowDto::new(weekday, &window)))
}

/// GET /v1/providers/{id}/availability
///
/// A provider's full recurring week, unset days included as inactive.
pub async fn get_week_schedule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<WeekScheduleResponse> {
    let schedule = db_services::week_schedule(state.repository.as_ref(), ProviderId::new(id)).await?;

    let windows = schedule
        .windows()
        .map(|(weekday, window)| WindowDto::new(weekday, window))
        .collect();

    Ok(Json(WeekScheduleResponse {
        provider_id: id,
        windows,
    }))
}

// =============================================================================
// Patients
// =============================================================================

/// GET /v1/patients/{id}/appointments
///
/// Every appointment a patient has booked, ordered by date then start time.
pub async fn patient_appointments(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<PatientAppointmentsResponse> {
    let appointments =
        db_services::patient_appointments(state.repository.as_ref(), PatientId::new(id)).await?;

    let appointments: Vec<AppointmentDto> = appointments.into_iter().map(Into::into).collect();
    let total = appointments.len();

    Ok(Json(PatientAppointmentsResponse {
        patient_id: id,
        appointments,
        total,
    }))
}
