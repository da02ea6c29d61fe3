//! Demo data for development builds.

use chrono::Utc;

use unispace_shared::{QrPayload, Role, SpaceId, User};

use crate::models::{Link, ManagerContact, Space, SupervisorContact};
use crate::registry::SpaceRegistry;

/// The administrator offered by the demo login.
pub fn demo_admin() -> User {
    User {
        id: "1".into(),
        email: "admin@university.edu".into(),
        name: "Admin User".into(),
        role: Role::Admin,
        university_id: "ADMIN001".into(),
    }
}

/// The end user offered by the demo login.
pub fn demo_student() -> User {
    User {
        id: "2".into(),
        email: "student@university.edu".into(),
        name: "Student User".into(),
        role: Role::User,
        university_id: "STU001".into(),
    }
}

fn demo_space() -> Space {
    let id = SpaceId::from("1");
    let now = Utc::now();

    Space {
        qr_code: QrPayload::for_space(&id).encode(),
        id,
        name: "Computer Lab A".into(),
        number: "CL-101".into(),
        description: Some("Main computer laboratory with 30 workstations".into()),
        photos: vec!["https://images.unsplash.com/photo-1562774053-701939374585?w=400".into()],
        manager: ManagerContact {
            name: "John Smith".into(),
            email: "j.smith@university.edu".into(),
            phone: Some("+1-555-0123".into()),
        },
        academic_supervisor: SupervisorContact {
            name: "Dr. Jane Doe".into(),
            email: "j.doe@university.edu".into(),
            department: "Computer Science".into(),
        },
        access_requirements: "Valid student ID required. Lab hours: 8 AM - 10 PM".into(),
        documentation: Vec::new(),
        links: vec![Link {
            id: "1".into(),
            title: "Lab Schedule".into(),
            url: "https://university.edu/lab-schedule".into(),
            description: Some("Current lab schedule and availability".into()),
        }],
        emergency_procedures:
            "In case of emergency, evacuate immediately and contact security at ext. 911".into(),
        created_at: now,
        updated_at: now,
        is_deleted: false,
    }
}

impl SpaceRegistry {
    /// Sign in the demo admin and add the demo space.
    pub fn seed_demo_data(&mut self) {
        self.set_current_user(demo_admin());
        self.add_space(demo_space());
    }

    pub fn with_demo_data() -> Self {
        let mut registry = Self::new();
        registry.seed_demo_data();
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_registry_is_ready_for_an_admin() {
        let registry = SpaceRegistry::with_demo_data();
        assert!(registry.is_admin());
        assert_eq!(registry.counts(), (1, 0));

        let lab = registry.space_by_id("1").unwrap();
        assert_eq!(lab.number, "CL-101");
        assert_eq!(registry.resolve_qr(&lab.qr_code).unwrap().id, lab.id);
    }

    #[test]
    fn demo_users_have_distinct_roles() {
        assert!(demo_admin().is_admin());
        assert!(!demo_student().is_admin());
    }
}
