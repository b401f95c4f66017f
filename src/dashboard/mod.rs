//! Role-scoped dashboard composition.
//!
//! Each role gets the same shell (sidebar, header, searchable content
//! area) parameterized by its own section enum. Sections are a closed
//! set per role; the shell tracks which ones have been visited so each
//! section's data loads on first activation only.

pub mod search;
pub mod shell;

pub use search::Searchable;
pub use shell::Shell;

/// Generates one role's sidebar section enum: a closed, ordered set
/// with display titles.
macro_rules! sections {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $title:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Sidebar entries in display order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn title(&self) -> &'static str {
                match self {
                    $(Self::$variant => $title),+
                }
            }
        }
    };
}

sections!(
    /// Sections of the patient dashboard.
    PatientSection {
        Overview => "Overview",
        Appointments => "My Appointments",
        Prescriptions => "Prescriptions",
        MedicalRecords => "Medical Records",
        Billing => "Billing",
    }
);

sections!(
    /// Sections of the doctor dashboard.
    DoctorSection {
        Overview => "Overview",
        Appointments => "Appointments",
        Patients => "My Patients",
        Treatments => "Treatments",
    }
);

sections!(
    /// Sections of the staff dashboard.
    StaffSection {
        Overview => "Overview",
        Appointments => "Appointments",
        Patients => "Patients",
        Doctors => "Doctors",
    }
);

sections!(
    /// Sections of the superadmin console.
    SuperadminSection {
        Overview => "Platform Overview",
        Tenants => "Tenants",
        Users => "Users",
        Revenue => "Revenue",
    }
);
