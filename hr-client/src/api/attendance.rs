// Attendance: read-only list

use shared::models::Attendance;

use super::{Resource, ResourceSpec};

impl Resource for Attendance {
    const SPEC: ResourceSpec = ResourceSpec {
        name: "attendance",
        list_path: "api/attendance/v1/getAttendance",
        route: "/attendance",
        searchable: true,
    };
}
