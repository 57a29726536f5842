use chrono::Utc;
use kalahasta_core::repository::{load_collection, save_collection};
use kalahasta_core::{IdentityProvider, Session};
use kalahasta_shared::keys;
use uuid::Uuid;

use crate::models::{NewRecording, Recording};
use crate::{ContentError, ContentStore};

const MOCK_TRANSCRIPTION: &str = "I am a traditional Kalamkari artist from Andhra Pradesh. \
    My family has been practicing this ancient art form for generations. We use natural dyes \
    and hand-painted techniques to create beautiful textiles that tell stories of our culture \
    and heritage.";

fn mock_story(artist: &impl IdentityProvider) -> String {
    let name = artist.display_name();
    format!(
        "Meet {name}, a master {craft} artist whose family has preserved this ancient craft for \
         generations. With skilled hands and a deep connection to cultural traditions, {name} \
         creates stunning pieces that bridge the gap between traditional artistry and contemporary \
         appreciation. Each work tells a story of heritage, patience, and the timeless beauty of \
         handcrafted art.",
        name = name,
        craft = artist.craft(),
    )
}

impl ContentStore {
    pub async fn list_recordings(&self, session: &Session) -> Result<Vec<Recording>, ContentError> {
        Ok(load_collection(self.store(), &keys::recordings(session.user_id())).await?)
    }

    /// Recordings in the delete bin
    pub async fn list_binned(&self, session: &Session) -> Result<Vec<Recording>, ContentError> {
        Ok(load_collection(self.store(), &keys::delete_bin(session.user_id())).await?)
    }

    /// Store a finished recording with its (mock) transcription and story.
    pub async fn add_recording(&self, session: &Session, audio: NewRecording) -> Result<Recording, ContentError> {
        let key = keys::recordings(session.user_id());
        let mut recordings: Vec<Recording> = load_collection(self.store(), &key).await?;

        let recording = Recording {
            id: Uuid::new_v4(),
            name: format!("Recording {}", recordings.len() + 1),
            duration: audio.duration,
            timestamp: Utc::now(),
            audio_blob_data: audio.audio,
            transcription: Some(MOCK_TRANSCRIPTION.to_string()),
            story: Some(mock_story(session)),
            approved: false,
        };
        recordings.push(recording.clone());
        save_collection(self.store(), &key, &recordings).await?;

        tracing::info!("Recording {} saved ({}s)", recording.id, recording.duration);
        Ok(recording)
    }

    /// Soft delete: move the recording into the delete bin.
    pub async fn bin_recording(&self, session: &Session, recording_id: Uuid) -> Result<(), ContentError> {
        let user_id = session.user_id();
        self.move_recording(&keys::recordings(user_id), &keys::delete_bin(user_id), recording_id)
            .await?;
        tracing::info!("Recording {} moved to delete bin", recording_id);
        Ok(())
    }

    pub async fn restore_recording(&self, session: &Session, recording_id: Uuid) -> Result<(), ContentError> {
        let user_id = session.user_id();
        self.move_recording(&keys::delete_bin(user_id), &keys::recordings(user_id), recording_id)
            .await?;
        tracing::info!("Recording {} restored", recording_id);
        Ok(())
    }

    /// Remove a binned recording for good.
    pub async fn purge_recording(&self, session: &Session, recording_id: Uuid) -> Result<(), ContentError> {
        let key = keys::delete_bin(session.user_id());
        let mut binned: Vec<Recording> = load_collection(self.store(), &key).await?;

        let before = binned.len();
        binned.retain(|r| r.id != recording_id);
        if binned.len() == before {
            return Err(ContentError::NotFound { kind: "Recording", id: recording_id });
        }

        save_collection(self.store(), &key, &binned).await?;
        tracing::info!("Recording {} permanently deleted", recording_id);
        Ok(())
    }

    pub async fn approve_story(&self, session: &Session, recording_id: Uuid) -> Result<Recording, ContentError> {
        let key = keys::recordings(session.user_id());
        let mut recordings: Vec<Recording> = load_collection(self.store(), &key).await?;

        let recording = recordings
            .iter_mut()
            .find(|r| r.id == recording_id)
            .ok_or(ContentError::NotFound { kind: "Recording", id: recording_id })?;
        recording.approved = true;
        let approved = recording.clone();

        save_collection(self.store(), &key, &recordings).await?;
        Ok(approved)
    }

    async fn move_recording(&self, from: &str, to: &str, recording_id: Uuid) -> Result<(), ContentError> {
        let mut source: Vec<Recording> = load_collection(self.store(), from).await?;
        let position = source
            .iter()
            .position(|r| r.id == recording_id)
            .ok_or(ContentError::NotFound { kind: "Recording", id: recording_id })?;
        let recording = source.remove(position);

        let mut target: Vec<Recording> = load_collection(self.store(), to).await?;
        target.push(recording);

        // Target first: an interrupted move leaves a duplicate, never a loss.
        save_collection(self.store(), to, &target).await?;
        save_collection(self.store(), from, &source).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::models::NewRecording;
    use crate::test_support::signed_in;
    use crate::ContentError;
    use uuid::Uuid;

    fn audio(duration: u32) -> NewRecording {
        NewRecording { duration, audio: vec![0x1a, 0x45, 0xdf, 0xa3] }
    }

    #[tokio::test]
    async fn test_recordings_are_numbered_and_storied() {
        let (content, _, session) = signed_in().await;

        let first = content.add_recording(&session, audio(30)).await.unwrap();
        let second = content.add_recording(&session, audio(95)).await.unwrap();

        assert_eq!(first.name, "Recording 1");
        assert_eq!(second.name, "Recording 2");
        assert!(!second.approved);
        let story = second.story.unwrap();
        assert!(story.starts_with("Meet Lakshmi Devi, a master Kalamkari artist"));
        assert!(second.transcription.is_some());
    }

    #[tokio::test]
    async fn test_bin_restore_purge() {
        let (content, _, session) = signed_in().await;
        let recording = content.add_recording(&session, audio(30)).await.unwrap();

        content.bin_recording(&session, recording.id).await.unwrap();
        assert!(content.list_recordings(&session).await.unwrap().is_empty());
        assert_eq!(content.list_binned(&session).await.unwrap(), vec![recording.clone()]);

        content.restore_recording(&session, recording.id).await.unwrap();
        assert_eq!(content.list_recordings(&session).await.unwrap(), vec![recording.clone()]);
        assert!(content.list_binned(&session).await.unwrap().is_empty());

        content.bin_recording(&session, recording.id).await.unwrap();
        content.purge_recording(&session, recording.id).await.unwrap();
        assert!(content.list_binned(&session).await.unwrap().is_empty());
        assert!(content.list_recordings(&session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_purge_only_reaches_the_bin() {
        let (content, _, session) = signed_in().await;
        let recording = content.add_recording(&session, audio(30)).await.unwrap();

        let result = content.purge_recording(&session, recording.id).await;
        assert!(matches!(result, Err(ContentError::NotFound { kind: "Recording", .. })));
        assert_eq!(content.list_recordings(&session).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_approve_story() {
        let (content, _, session) = signed_in().await;
        let recording = content.add_recording(&session, audio(30)).await.unwrap();

        let approved = content.approve_story(&session, recording.id).await.unwrap();
        assert!(approved.approved);
        assert!(content.list_recordings(&session).await.unwrap()[0].approved);

        let missing = content.approve_story(&session, Uuid::new_v4()).await;
        assert!(missing.is_err());
    }
}
