#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to publish a release for an existing tag.
pub struct CreateReleaseRequest {
    pub tag_name: String,
    /// Release title
    pub name: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Release record returned by the forge after creation.
pub struct CreatedRelease {
    pub id: u64,
    pub html_url: String,
}
