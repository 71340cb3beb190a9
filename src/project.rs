//! Minimal CMake project skeleton: `CMakeLists.txt`, `main.cpp`, `build/`.

use std::path::{Path, PathBuf};

use crate::error::{Result, ScaffoldError};
use crate::generate::GenerationPlan;

const CMAKE_LISTS: &str = r#"cmake_minimum_required(VERSION 2.6)
set (CMAKE_CXX_FLAGS "${CMAKE_CXX_FLAGS} -std=c++14 -Wall -g -Werror")
add_executable(main main.cpp)

find_package(Boost)
if (Boost_FOUND)
    include_directories(${Boost_INCLUDE_DIRS})
    target_link_libraries(main ${Boost_LIBRARIES})
endif()
"#;

const MAIN_CPP: &str = r#"#include <iostream>

int main(int argc, const char* argv[]) {
    return 0;
}
"#;

/// Plan the skeleton inside `dir`, which must exist.
pub fn plan_project(dir: &Path, force: bool) -> Result<GenerationPlan> {
    if !dir.is_dir() {
        return Err(ScaffoldError::PathNotFound(dir.to_path_buf()));
    }
    let mut plan = GenerationPlan::new(force);
    plan.add_file(dir.join("CMakeLists.txt"), CMAKE_LISTS.to_string());
    plan.add_file(dir.join("main.cpp"), MAIN_CPP.to_string());
    plan.add_dir(dir.join("build"));
    plan.validate()?;
    Ok(plan)
}

/// Write the skeleton; returns every created path.
pub fn init_project(dir: &Path, force: bool) -> Result<Vec<PathBuf>> {
    plan_project(dir, force)?.commit()
}
