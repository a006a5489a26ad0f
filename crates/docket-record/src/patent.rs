//! The central patent record
//!
//! A patent owns its inventors and carries the full sub-stage state for the
//! PS, CS, and FER stages. The FER stage is conditional: its sub-stages are
//! only meaningful while `fer_active` is set. `withdrawn` is terminal and
//! overrides all stage logic downstream.

use crate::forms::FormSet;
use crate::id::{PatentId, TrackingId};
use crate::stage::{StageId, StagePair, SubStage, SubStageKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An inventor named on a patent, owned by the patent record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventor {
    /// Inventor name
    pub name: String,
    /// Inventor address
    pub address: Option<String>,
}

impl Inventor {
    /// Create an inventor entry
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
        }
    }

    /// With an address
    #[inline]
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// The central case-management entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patent {
    /// Opaque primary identifier
    pub id: PatentId,
    /// Human-facing unique tracking identifier
    pub tracking_id: TrackingId,
    /// Patent title
    pub title: String,
    /// Applicant name
    pub applicant: String,
    /// Applicant address; trailing comma-delimited token is treated as the
    /// state for geographic grouping
    pub applicant_addr: Option<String>,
    /// Owning client identifier
    pub client_id: Option<String>,
    /// Provisional specification stage
    pub ps: StagePair,
    /// Complete specification stage
    pub cs: StagePair,
    /// First examination report stage
    pub fer: StagePair,
    /// Whether an FER cycle is active at all
    pub fer_active: bool,
    /// Terminal withdrawal flag
    pub withdrawn: bool,
    /// Reason recorded at withdrawal
    pub withdrawal_reason: Option<String>,
    /// Statutory forms filed so far
    pub forms: FormSet,
    /// Inventors, created and deleted with the patent
    pub inventors: Vec<Inventor>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl Patent {
    /// Create a new patent record at the start of the pipeline
    #[must_use]
    pub fn new(
        tracking_id: TrackingId,
        title: impl Into<String>,
        applicant: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: PatentId::new(),
            tracking_id,
            title: title.into(),
            applicant: applicant.into(),
            applicant_addr: None,
            client_id: None,
            ps: StagePair::new(),
            cs: StagePair::new(),
            fer: StagePair::new(),
            fer_active: false,
            withdrawn: false,
            withdrawal_reason: None,
            forms: FormSet::new(),
            inventors: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// With an applicant address
    #[inline]
    #[must_use]
    pub fn with_applicant_addr(mut self, addr: impl Into<String>) -> Self {
        self.applicant_addr = Some(addr.into());
        self
    }

    /// With an owning client
    #[inline]
    #[must_use]
    pub fn with_client(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// With an inventor
    #[inline]
    #[must_use]
    pub fn with_inventor(mut self, inventor: Inventor) -> Self {
        self.inventors.push(inventor);
        self
    }

    /// With an active FER cycle
    #[inline]
    #[must_use]
    pub fn with_fer_active(mut self) -> Self {
        self.fer_active = true;
        self
    }

    /// Stage pair by stage
    #[inline]
    #[must_use]
    pub fn stage_pair(&self, stage: StageId) -> &StagePair {
        match stage {
            StageId::Ps => &self.ps,
            StageId::Cs => &self.cs,
            StageId::Fer => &self.fer,
        }
    }

    /// Mutable stage pair by stage
    #[inline]
    pub fn stage_pair_mut(&mut self, stage: StageId) -> &mut StagePair {
        match stage {
            StageId::Ps => &mut self.ps,
            StageId::Cs => &mut self.cs,
            StageId::Fer => &mut self.fer,
        }
    }

    /// Sub-stage by stage and kind
    #[inline]
    #[must_use]
    pub fn sub_stage(&self, stage: StageId, kind: SubStageKind) -> &SubStage {
        self.stage_pair(stage).sub(kind)
    }

    /// Mutable sub-stage by stage and kind
    #[inline]
    pub fn sub_stage_mut(&mut self, stage: StageId, kind: SubStageKind) -> &mut SubStage {
        self.stage_pair_mut(stage).sub_mut(kind)
    }

    /// Whether a stage is required for completion of this patent
    ///
    /// PS and CS are always required; FER only while `fer_active`.
    #[inline]
    #[must_use]
    pub fn stage_required(&self, stage: StageId) -> bool {
        match stage {
            StageId::Ps | StageId::Cs => true,
            StageId::Fer => self.fer_active,
        }
    }

    /// Trailing comma-delimited token of the applicant address, trimmed
    ///
    /// None when the address is absent or reduces to an empty token.
    #[must_use]
    pub fn applicant_state(&self) -> Option<&str> {
        let addr = self.applicant_addr.as_deref()?;
        let state = addr.rsplit(',').next()?.trim();
        if state.is_empty() {
            None
        } else {
            Some(state)
        }
    }

    /// Record a mutation timestamp
    #[inline]
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
