mod add_files_to_the_staging_index;
mod adding_a_non_existent_file_fails;
