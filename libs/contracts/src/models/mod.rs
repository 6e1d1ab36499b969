pub mod account;
pub mod analysis;
pub mod common;
pub mod feedback;
pub mod user;
pub mod watson;

pub use account::{
    AccountIntegration, AccountIntegrations, AccountSetting, AccountSettingPostBody, AccountTier,
    IntegrationStatus, TicketImport, ZenDeskIntegration,
};
pub use analysis::FeedbackAnalysis;
pub use common::{
    CategoryConfidence, Class, ModelSavedFields, Sentence, Sentiment, SentimentAnalysisResponse,
    SupportedLanguage, TextSpan,
};
pub use feedback::{
    EmailFeedback, EmailFeedbackPostBody, EmailFeedbackWithMaybeAnalysis, FeedbackType,
    TwitterFeedback, TwitterFeedbackWithMaybeAnalysis, ZenDeskTicket,
    ZenDeskTicketWithMaybeAnalysis,
};
pub use user::{EmailUser, TwitterUser, User, ZenDeskUser};
pub use watson::{WatsonClass, WatsonClassifier, WatsonClassifierStatus, WatsonClassifyResponse};
