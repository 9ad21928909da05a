use crate::error::*;
use crate::registry::AttackFactory;
use crate::Attack;

pub type ResolveResult = Result<AttackFactory, AttackError>;
pub type BuildResult = Result<Box<dyn Attack>, AttackError>;
