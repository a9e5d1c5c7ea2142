mod checkout_branch_successfully;
mod checkout_file_from_a_commit;
mod checkout_with_untracked_files_in_the_way;
