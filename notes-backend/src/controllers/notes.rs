//! Notes REST API: list/search, create, update and delete.

use actix_web::error::InternalError;
use actix_web::{HttpResponse, Responder, web};
use notes_types::{DataResponse, ListNotesQuery, MessageResponse, NoteInput};

use crate::AppState;
use crate::db::NoteStoreError;

/// Map a store failure to the HTTP contract. Database details stay in the log.
fn error_response(err: NoteStoreError) -> HttpResponse {
    match err {
        NoteStoreError::Validation(message) => {
            HttpResponse::BadRequest().json(MessageResponse::new(message))
        }
        NoteStoreError::NotFound(_) => {
            HttpResponse::NotFound().json(MessageResponse::new("Note not found"))
        }
        NoteStoreError::Pool(_) | NoteStoreError::Database(_) => {
            log::error!("[NOTES] {}", err);
            HttpResponse::InternalServerError().json(MessageResponse::new("Internal server error"))
        }
    }
}

/// GET /notes[?title=]
async fn list_notes(
    data: web::Data<AppState>,
    query: web::Query<ListNotesQuery>,
) -> impl Responder {
    match data.db.list_notes(query.title.as_deref()) {
        Ok(notes) => HttpResponse::Ok().json(DataResponse::new(notes)),
        Err(e) => error_response(e),
    }
}

/// POST /notes
async fn create_note(data: web::Data<AppState>, body: web::Json<NoteInput>) -> impl Responder {
    let input = body.into_inner();

    match data
        .db
        .create_note(input.title.as_deref(), input.content.as_deref())
    {
        Ok(note) => {
            log::info!("[NOTES] Created note {}", note.id);
            HttpResponse::Created().json(DataResponse::new(note))
        }
        Err(e) => error_response(e),
    }
}

/// PUT /notes/{id}
async fn update_note(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<NoteInput>,
) -> impl Responder {
    let id = path.into_inner();
    let input = body.into_inner();

    match data
        .db
        .update_note(id, input.title.as_deref(), input.content.as_deref())
    {
        Ok(note) => {
            log::info!("[NOTES] Updated note {}", id);
            HttpResponse::Ok().json(DataResponse::new(note))
        }
        Err(e) => error_response(e),
    }
}

/// DELETE /notes/{id}
async fn delete_note(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();

    match data.db.delete_note(id) {
        Ok(()) => {
            log::info!("[NOTES] Deleted note {}", id);
            HttpResponse::Ok().json(MessageResponse::new("Note deleted"))
        }
        Err(e) => error_response(e),
    }
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = format!("Invalid request body: {}", err);
        InternalError::from_response(err, HttpResponse::BadRequest().json(MessageResponse::new(message)))
            .into()
    })
}

fn path_config() -> web::PathConfig {
    // A non-numeric id can never name a note
    web::PathConfig::default().error_handler(|err, _req| {
        InternalError::from_response(err, HttpResponse::NotFound().json(MessageResponse::new("Note not found")))
            .into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let message = format!("Invalid query: {}", err);
        InternalError::from_response(err, HttpResponse::BadRequest().json(MessageResponse::new(message)))
            .into()
    })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/notes")
            .app_data(json_config())
            .app_data(path_config())
            .app_data(query_config())
            .route("", web::get().to(list_notes))
            .route("", web::post().to(create_note))
            .route("/{id}", web::put().to(update_note))
            .route("/{id}", web::delete().to(delete_note)),
    );
}
