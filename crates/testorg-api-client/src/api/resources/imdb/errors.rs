use super::MovieId;
use crate::errors::TestOrgApiError;

/// `GET /movies/{movieId}` found no movie with that id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Movie '{movie_id}' does not exist")]
pub struct MovieDoesNotExistError {
    pub movie_id: MovieId,
}

impl MovieDoesNotExistError {
    pub const STATUS_CODE: u16 = 404;
}

impl TryFrom<&TestOrgApiError> for MovieDoesNotExistError {
    type Error = ();

    fn try_from(error: &TestOrgApiError) -> Result<Self, Self::Error> {
        if error.status_code != Some(Self::STATUS_CODE) {
            return Err(());
        }
        error
            .body_as::<MovieId>()
            .map(|movie_id| Self { movie_id })
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api_error(status_code: u16, body: serde_json::Value) -> TestOrgApiError {
        TestOrgApiError {
            status_code: Some(status_code),
            body: Some(body),
            ..Default::default()
        }
    }

    #[test]
    fn test_converts_404_with_movie_id_body() {
        let error = MovieDoesNotExistError::try_from(&api_error(404, json!("tt404"))).unwrap();
        assert_eq!(error.movie_id, MovieId::new("tt404"));
        assert_eq!(error.to_string(), "Movie 'tt404' does not exist");
    }

    #[test]
    fn test_rejects_other_statuses() {
        assert!(MovieDoesNotExistError::try_from(&api_error(500, json!("tt404"))).is_err());
        assert!(MovieDoesNotExistError::try_from(&TestOrgApiError::new("aborted")).is_err());
    }

    #[test]
    fn test_rejects_non_movie_id_body() {
        assert!(
            MovieDoesNotExistError::try_from(&api_error(404, json!({"error": "not found"})))
                .is_err()
        );
    }
}
